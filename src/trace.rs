//! JSONL capture of every question answered in a ranking session.

use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::session::{ComparisonEvent, ComparisonObserver, ObserverError};
use crate::sort::Strategy;

/// One answered question, as written to the trace file.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTrace {
    pub timestamp_ms: i64,
    pub comparison_index: usize,
    pub strategy: Strategy,
    pub first: String,
    pub second: String,
    pub chosen: String,
    pub alternative: String,
}

impl ComparisonTrace {
    pub fn from_event<T: Display>(event: &ComparisonEvent<T>) -> Self {
        let (first, second) = &event.presented;
        Self {
            timestamp_ms: epoch_millis(),
            comparison_index: event.comparison_index,
            strategy: event.strategy,
            first: first.to_string(),
            second: second.to_string(),
            chosen: event.chosen.to_string(),
            alternative: event.alternative.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("trace file: {0}")]
    Io(#[from] std::io::Error),
    #[error("trace encoding: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("trace writer has already stopped")]
    Closed,
    #[error("trace writer panicked")]
    Panicked,
}

/// Sends traces to a background thread that appends them to a file.
///
/// The file is complete only after every sink clone is dropped and
/// [`TraceWorker::join`] returns.
#[derive(Clone)]
pub struct JsonlTraceSink {
    sender: Sender<ComparisonTrace>,
}

/// Handle on the writer thread behind a [`JsonlTraceSink`].
pub struct TraceWorker {
    handle: JoinHandle<Result<(), TraceError>>,
}

impl TraceWorker {
    pub fn join(self) -> Result<(), TraceError> {
        self.handle.join().map_err(|_| TraceError::Panicked)?
    }
}

impl JsonlTraceSink {
    /// Create (or truncate) `path` and start the writer thread.
    pub fn new(path: impl AsRef<Path>) -> Result<(Self, TraceWorker), TraceError> {
        let file = File::create(path)?;
        let (sender, receiver) = channel();
        let handle = thread::spawn(move || drain_to_file(file, receiver));
        Ok((Self { sender }, TraceWorker { handle }))
    }

    pub fn record(&self, trace: ComparisonTrace) -> Result<(), TraceError> {
        self.sender.send(trace).map_err(|_| TraceError::Closed)
    }
}

impl<T: Display> ComparisonObserver<T> for JsonlTraceSink {
    fn on_comparison(&self, event: &ComparisonEvent<T>) -> Result<(), ObserverError> {
        self.record(ComparisonTrace::from_event(event))
            .map_err(|e| ObserverError::Message(e.to_string()))
    }
}

fn drain_to_file(file: File, receiver: Receiver<ComparisonTrace>) -> Result<(), TraceError> {
    let mut out = BufWriter::new(file);
    for trace in receiver {
        serde_json::to_writer(&mut out, &trace)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
