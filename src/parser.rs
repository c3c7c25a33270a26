//! Parser collaborator surface.
//!
//! A parser instance is stateful and not shareable across workers, so it is
//! never passed around live. Instead a `ParserFactory` travels to each worker
//! and reconstructs a fresh instance from (factory, repository roots) inside
//! the task that will use it.

use anyhow::Result;
use std::io::BufRead;
use std::path::PathBuf;

use crate::analysis::Metadata;
use crate::record::Record;

/// Lazy sequence of records produced by a parser for one open file.
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<Record>> + 'a>;

/// A stateful parser bound to one worker task.
pub trait StreamParser {
    /// Prepare the instance with the run metadata. Called exactly once,
    /// before any parsing; a failure aborts the task without parsing.
    fn initialize(&mut self, metadata: &Metadata) -> Result<()>;

    /// Parse one open file into a lazy sequence of records. The worker
    /// drains this fully before the handle is released.
    fn parse_stream<'a>(&'a mut self, handle: Box<dyn BufRead + Send + 'a>) -> RecordIter<'a>;
}

/// Recipe for constructing a parser inside any worker. Must be deterministic
/// and side-effect-free beyond the returned instance's own state: each
/// construction yields an independent parser.
pub trait ParserFactory: Send + Sync {
    fn construct(&self, repo_roots: &[PathBuf]) -> Box<dyn StreamParser>;
}
