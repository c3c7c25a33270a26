use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single file's task. Fatal to that file only: other in-flight
/// and queued tasks are unaffected.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Parser construction or initialization failed; parsing was not attempted.
    #[error("parser initialization failed for {path}: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The input file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser raised while producing records. Partially produced records
    /// for the file are discarded: batches are all-or-nothing.
    #[error("parse failure in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl TaskError {
    /// The file this failure is attached to.
    pub fn path(&self) -> &Path {
        match self {
            TaskError::Init { path, .. } | TaskError::Parse { path, .. } => path,
            TaskError::Io { path, .. } => path,
        }
    }
}

/// Failure surfaced by the merged record stream.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The worker pool could not be started. Fatal to the entire run.
    #[error("worker pool failed to start: {0}")]
    PoolStart(#[source] std::io::Error),

    /// A worker thread crashed unrecoverably. Fatal to the entire run;
    /// surfaced once, after all surviving workers have drained.
    #[error("worker thread panicked")]
    WorkerPanic,

    /// A single file's task failed; the stream continues with other files.
    #[error(transparent)]
    Task(#[from] TaskError),
}
