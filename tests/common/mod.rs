// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parfan::{Metadata, ParserFactory, Record, RecordIter, StreamParser};

/// Test parser: each input line is one JSON object record.
///
/// Two extra behaviors for exercising the dispatcher:
/// - a `delay_ms` field on a record makes the parser sleep that long before
///   yielding it, to simulate variable per-task latency;
/// - the run metadata's `run_id`, if present, is injected into every record,
///   proving each task received the metadata by value.
pub struct JsonLinesParser {
    run_id: Option<serde_json::Value>,
    initialized: bool,
}

impl StreamParser for JsonLinesParser {
    fn initialize(&mut self, metadata: &Metadata) -> Result<()> {
        self.run_id = metadata.get("run_id").cloned();
        self.initialized = true;
        Ok(())
    }

    fn parse_stream<'a>(&'a mut self, handle: Box<dyn BufRead + Send + 'a>) -> RecordIter<'a> {
        assert!(self.initialized, "parse_stream called before initialize");
        let run_id = self.run_id.clone();
        Box::new(handle.lines().map(move |line| {
            let line = line?;
            let fields = serde_json::from_str(&line)?;
            let mut record = Record { fields };
            if let Some(delay) = record.get("delay_ms").and_then(|v| v.as_u64()) {
                std::thread::sleep(Duration::from_millis(delay));
            }
            if let Some(run_id) = &run_id {
                record.set_field("run_id", run_id.clone());
            }
            Ok(record)
        }))
    }
}

/// Factory for `JsonLinesParser`. Holds an opaque token so tests can verify
/// by `Arc` strong-count accounting that the pool released every clone.
pub struct JsonLinesFactory {
    pub token: Arc<()>,
}

impl JsonLinesFactory {
    pub fn new() -> Self {
        Self {
            token: Arc::new(()),
        }
    }
}

impl ParserFactory for JsonLinesFactory {
    fn construct(&self, _repo_roots: &[PathBuf]) -> Box<dyn StreamParser> {
        Box::new(JsonLinesParser {
            run_id: None,
            initialized: false,
        })
    }
}

/// Factory whose parsers always fail initialization.
pub struct FailingInitFactory;

struct FailingInitParser;

impl StreamParser for FailingInitParser {
    fn initialize(&mut self, _metadata: &Metadata) -> Result<()> {
        anyhow::bail!("model definitions unavailable")
    }

    fn parse_stream<'a>(&'a mut self, _handle: Box<dyn BufRead + Send + 'a>) -> RecordIter<'a> {
        panic!("parse_stream must not be called after a failed initialize")
    }
}

impl ParserFactory for FailingInitFactory {
    fn construct(&self, _repo_roots: &[PathBuf]) -> Box<dyn StreamParser> {
        Box::new(FailingInitParser)
    }
}

/// Parser that panics when a record carries a `boom` field, otherwise
/// behaves like `JsonLinesParser`. Used to exercise pool-fatal behavior.
pub struct BoomParser;

impl StreamParser for BoomParser {
    fn initialize(&mut self, _metadata: &Metadata) -> Result<()> {
        Ok(())
    }

    fn parse_stream<'a>(&'a mut self, handle: Box<dyn BufRead + Send + 'a>) -> RecordIter<'a> {
        Box::new(handle.lines().map(|line| {
            let line = line?;
            let fields = serde_json::from_str(&line)?;
            let record = Record { fields };
            if record.get("boom").is_some() {
                panic!("parser blew up");
            }
            Ok(record)
        }))
    }
}

pub struct BoomFactory;

impl ParserFactory for BoomFactory {
    fn construct(&self, _repo_roots: &[PathBuf]) -> Box<dyn StreamParser> {
        Box::new(BoomParser)
    }
}

/// Write a JSONL fixture file and return its path.
pub fn write_jsonl(dir: &Path, name: &str, lines: &[serde_json::Value]) -> PathBuf {
    let path = dir.join(name);
    let contents: String = lines
        .iter()
        .map(|v| format!("{}\n", v))
        .collect();
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// Metadata with a `run_id` field.
pub fn run_metadata(run_id: &str) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("run_id", serde_json::json!(run_id));
    metadata
}

/// Collect integer `id` fields from successful records.
pub fn ids_of(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
        .collect()
}
