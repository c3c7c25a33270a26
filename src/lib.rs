// Core library for the parfan parallel parse dispatcher
//
// Given a set of input file paths and a parsing strategy, parfan distributes
// per-file parsing across a fixed pool of worker threads and produces one
// merged, lazily-consumed stream of parsed records in completion order.
// Parsing itself, file discovery, and metadata structure are collaborators
// supplied by the caller.

pub use analysis::{AnalysisOutput, FileSet, Metadata};
pub use decompression::{open_path, InputReader};
pub use diagnostics::{DiagnosticsSink, NullSink, StderrSink};
pub use error::{DispatchError, TaskError};
pub use parallel::{DispatchConfig, Dispatcher, RecordStream, ResultBatch};
pub use parser::{ParserFactory, RecordIter, StreamParser};
pub use record::{FieldMap, Record};

mod analysis;
mod decompression;
mod diagnostics;
mod error;
mod parallel;
mod parser;
mod record;
