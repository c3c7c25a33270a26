//! Worker thread for the parallel dispatch pipeline
//!
//! Each worker pulls tasks from the shared task channel, parses one file per
//! task with a freshly constructed parser instance, and sends the completed
//! batch (or the failure attached to that file) back to the merged stream.

use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::decompression::open_path;
use crate::error::TaskError;

use super::types::{ResultBatch, TaskInput};

/// Worker thread: executes tasks until the task channel disconnects, the
/// consumer drops the merged stream, or shutdown is requested.
pub(crate) fn worker_thread(
    _worker_id: usize,
    task_receiver: Receiver<TaskInput>,
    result_sender: Sender<Result<ResultBatch, TaskError>>,
    shutdown: Arc<AtomicBool>,
) {
    while let Ok(task) = task_receiver.recv() {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        let outcome = execute_task(&task);

        // A failed send means the consumer is gone; abandon remaining tasks.
        if result_sender.send(outcome).is_err() {
            break;
        }
    }
}

/// Execute one task: construct and initialize a parser, open the file, and
/// fully drain the parser's lazy record sequence into a concrete batch.
///
/// The batch must be materialized before it crosses the thread boundary, so
/// any parse error discards the partial batch: results are all-or-nothing
/// per file. The file handle is scoped to this call and released on every
/// exit path.
pub(crate) fn execute_task(task: &TaskInput) -> Result<ResultBatch, TaskError> {
    let mut parser = task.factory.construct(&task.repo_roots);

    parser
        .initialize(&task.metadata)
        .map_err(|source| TaskError::Init {
            path: task.path.clone(),
            source,
        })?;

    let handle = open_path(&task.path).map_err(|source| TaskError::Io {
        path: task.path.clone(),
        source,
    })?;

    let mut records = Vec::new();
    for item in parser.parse_stream(Box::new(handle)) {
        match item {
            Ok(record) => records.push(record),
            Err(source) => {
                return Err(TaskError::Parse {
                    path: task.path.clone(),
                    source,
                })
            }
        }
    }

    Ok(ResultBatch {
        path: task.path.clone(),
        records,
    })
}
