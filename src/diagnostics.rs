//! Progress and warning reporting for the dispatcher.
//!
//! The sink is injected rather than global so the core stays testable in
//! isolation; the default writes to stderr.

/// Receives human-readable progress and warning messages from the dispatcher.
pub trait DiagnosticsSink: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Default sink: stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticsSink for StderrSink {
    fn info(&self, message: &str) {
        eprintln!("parfan: {}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("parfan: warning: {}", message);
    }
}

/// Discards all messages. Useful in tests and embedding contexts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
