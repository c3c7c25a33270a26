//! Fan-out/merge dispatcher
//!
//! Owns the worker pool lifecycle: builds one task per input file, submits
//! them all, and re-exposes completed batches as a single merged lazy stream
//! of records in completion order.

use crossbeam_channel::{bounded, unbounded, Receiver};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::analysis::AnalysisOutput;
use crate::diagnostics::{DiagnosticsSink, StderrSink};
use crate::error::{DispatchError, TaskError};
use crate::parser::ParserFactory;
use crate::record::Record;

use super::types::{DispatchConfig, ResultBatch, TaskInput};
use super::worker::worker_thread;

/// Distributes per-file parsing across a fixed pool of worker threads.
///
/// The parser is carried as a factory rather than a live instance: each task
/// reconstructs its own parser from (factory, repo roots) inside the worker
/// that runs it.
pub struct Dispatcher {
    factory: Arc<dyn ParserFactory>,
    repo_roots: Arc<Vec<PathBuf>>,
    config: DispatchConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Dispatcher {
    pub fn new(factory: Arc<dyn ParserFactory>, repo_roots: Vec<PathBuf>) -> Self {
        Self {
            factory,
            repo_roots: Arc::new(repo_roots),
            config: DispatchConfig::default(),
            diagnostics: Arc::new(StderrSink),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Parse every file of `input` in parallel and return the merged record
    /// stream. Batches are yielded in completion order, not submission order;
    /// records within one file keep their parser-produced order.
    ///
    /// The stream is a single-traversal consumer of the pool: dropping it
    /// early tears the pool down and abandons unstarted tasks.
    pub fn parse(&self, input: &dyn AnalysisOutput) -> Result<RecordStream, DispatchError> {
        let files = input.file_names();
        let metadata = input.metadata().clone();
        let num_workers = self.config.num_workers.max(1);

        self.diagnostics.info(&format!(
            "parsing {} file(s) across {} worker(s)",
            files.len(),
            num_workers
        ));

        // All tasks are known up front: queue everything, then drop the
        // sender so workers see a disconnect once the queue drains.
        let (task_sender, task_receiver) = unbounded();
        for path in files {
            let task = TaskInput {
                factory: Arc::clone(&self.factory),
                repo_roots: Arc::clone(&self.repo_roots),
                metadata: metadata.clone(),
                path,
            };
            // The receiver is alive in this scope, so the send cannot fail.
            let _ = task_sender.send(task);
        }
        drop(task_sender);

        let (result_sender, result_receiver) =
            bounded(num_workers * self.config.result_buffer_factor.max(1));
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut workers = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let worker_tasks = task_receiver.clone();
            let worker_results = result_sender.clone();
            let worker_shutdown = Arc::clone(&shutdown);

            let spawned = thread::Builder::new()
                .name(format!("parfan-worker-{}", worker_id))
                .spawn(move || {
                    worker_thread(worker_id, worker_tasks, worker_results, worker_shutdown)
                });

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    // Pool-level failure: tear down whatever already started.
                    shutdown.store(true, Ordering::Relaxed);
                    drop(task_receiver);
                    drop(result_sender);
                    drop(result_receiver);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(DispatchError::PoolStart(source));
                }
            }
        }
        drop(task_receiver);
        drop(result_sender);

        Ok(RecordStream {
            batch: Vec::new().into_iter(),
            receiver: Some(result_receiver),
            workers,
            shutdown,
            diagnostics: Arc::clone(&self.diagnostics),
        })
    }
}

/// The merged output stream: records from all files, flattened in batch
/// completion order. Consumed exactly once.
///
/// Per-file failures are yielded inline as `Err` at the point the failing
/// file's records would have appeared; the stream then continues with the
/// remaining files. Dropping the stream before exhaustion shuts the pool
/// down and joins every worker before `drop` returns.
pub struct RecordStream {
    batch: std::vec::IntoIter<Record>,
    receiver: Option<Receiver<Result<ResultBatch, TaskError>>>,
    workers: Vec<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl RecordStream {
    /// All workers have disconnected; join them and surface a pool failure
    /// if any of them panicked.
    fn finish(&mut self) -> Option<Result<Record, DispatchError>> {
        self.receiver = None;

        let mut panicked = false;
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                panicked = true;
            }
        }

        if panicked {
            Some(Err(DispatchError::WorkerPanic))
        } else {
            None
        }
    }
}

impl Iterator for RecordStream {
    type Item = Result<Record, DispatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.batch.next() {
                return Some(Ok(record));
            }

            let receiver = self.receiver.as_ref()?;
            match receiver.recv() {
                Ok(Ok(batch)) => {
                    self.batch = batch.records.into_iter();
                }
                Ok(Err(err)) => {
                    self.diagnostics
                        .warn(&format!("skipping {}: {}", err.path().display(), err));
                    return Some(Err(err.into()));
                }
                Err(_) => return self.finish(),
            }
        }
    }
}

impl Drop for RecordStream {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);

        // Disconnect the result channel first so a worker blocked on a full
        // channel unblocks, then join every worker.
        self.receiver = None;
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}
