//! Rolling Logger
//!
//! In-memory circular log buffer exposed as a `tracing-subscriber` layer.
//! Every record is kept in a bounded ring (oldest entries are dropped first)
//! and echoed to the browser console on wasm32, or to stderr elsewhere.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Default number of records kept in memory
pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log capacity must be greater than zero")]
    ZeroCapacity,
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// A single captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Shared handle to the ring of recent records
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Result<Self, LoggerError> {
        if capacity == 0 {
            return Err(LoggerError::ZeroCapacity);
        }
        Ok(Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of the buffered records, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Records at `level` or more severe (ERROR is the most severe)
    pub fn entries_at_least(&self, level: Level) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.level <= level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock only leaves a partially written ring behind.
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Layer capturing events into a [`LogBuffer`]
pub struct RollingLayer {
    buffer: LogBuffer,
    echo: bool,
}

impl RollingLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer, echo: true }
    }

    /// Disable console/stderr echo (records are still buffered)
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            timestamp: Utc::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.finish(),
        };
        if self.echo {
            emit(&entry);
        }
        self.buffer.push(entry);
    }
}

/// Collects the `message` field first, then `key=value` pairs
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
            return;
        }
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={:?}", field.name(), value);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from_str(&entry.to_string());
    match entry.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(entry: &LogEntry) {
    eprintln!("{}", entry);
}

/// Install the rolling layer as the global subscriber.
///
/// Returns the buffer handle so the UI can show recent records.
pub fn init_logger(capacity: usize, app_name: &str) -> Result<LogBuffer, LoggerError> {
    let buffer = LogBuffer::new(capacity)?;
    tracing_subscriber::registry()
        .with(RollingLayer::new(buffer.clone()))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;
    tracing::info!(app = app_name, capacity, "rolling logger initialized");
    Ok(buffer)
}
