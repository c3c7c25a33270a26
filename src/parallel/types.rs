//! Type definitions for the parallel dispatch pipeline
//!
//! Contains the unit of work, the per-file result batch, and the pool
//! configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::Metadata;
use crate::parser::ParserFactory;
use crate::record::Record;

/// Configuration for the worker pool.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Number of worker threads. Defaults to the available CPU parallelism.
    pub num_workers: usize,
    /// Bound for the completed-batch channel, as a multiple of `num_workers`.
    /// Keeps fast workers from buffering unboundedly ahead of a slow consumer.
    pub result_buffer_factor: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            result_buffer_factor: 4,
        }
    }
}

/// One unit of work: everything a worker needs to parse one file.
///
/// The (factory, repo roots, metadata) triple is built once per dispatch and
/// cloned by value into every task; the factory and roots are immutable and
/// shared by `Arc`, never mutated. Each task constructs its own parser
/// instance from the factory and discards it when the task ends.
pub(crate) struct TaskInput {
    pub factory: Arc<dyn ParserFactory>,
    pub repo_roots: Arc<Vec<PathBuf>>,
    pub metadata: Metadata,
    pub path: PathBuf,
}

/// The complete, ordered result of parsing a single file.
#[derive(Debug)]
pub struct ResultBatch {
    /// The file this batch came from.
    pub path: PathBuf,
    /// Records in the exact order the parser produced them.
    pub records: Vec<Record>,
}
