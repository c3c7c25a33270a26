//! Parallel fan-out/merge machinery
//!
//! Splits per-file parsing across a fixed pool of worker threads and merges
//! completed batches into a single lazily-consumed record stream.
//!
//! # Module Structure
//!
//! - `types`: Task, batch, and configuration data structures
//! - `worker`: Worker thread and single-task execution
//! - `dispatcher`: Pool lifecycle and the merged record stream

mod dispatcher;
mod types;
mod worker;

// Re-export public types
pub use dispatcher::{Dispatcher, RecordStream};
pub use types::{DispatchConfig, ResultBatch};
