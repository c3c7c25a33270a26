//! Input collaborator surface: what a run of an analysis tool hands to the
//! dispatcher. The core only ever asks for the file paths and the run
//! metadata; it never interprets their internal structure.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::record::FieldMap;

/// Immutable, serializable description of an analysis run (provenance, run
/// identifiers, tool version, ...). Opaque to the core: it is cloned by value
/// into every worker task and never read by the dispatcher itself.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct Metadata {
    pub fields: FieldMap,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// The output of an analysis tool, as the dispatcher sees it: a set of files
/// to parse and the metadata describing the run that produced them.
pub trait AnalysisOutput {
    /// The full set of files to parse. Enumerated once, up front.
    fn file_names(&self) -> Vec<PathBuf>;

    /// Metadata for the run; passed by value to every worker task.
    fn metadata(&self) -> &Metadata;
}

/// The trivial `AnalysisOutput`: an explicit list of paths plus metadata.
/// File discovery beyond this lives in outer tooling.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<PathBuf>,
    metadata: Metadata,
}

impl FileSet {
    pub fn new(files: Vec<PathBuf>, metadata: Metadata) -> Self {
        Self { files, metadata }
    }
}

impl AnalysisOutput for FileSet {
    fn file_names(&self) -> Vec<PathBuf> {
        self.files.clone()
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
