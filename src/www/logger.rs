//! Destinations for the `DataServer`'s per-request error lines.

use std::sync::Mutex;

/// Receives one fully formatted diagnostic line per failed request.
pub trait LogSink: Send + Sync {
    fn log(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, line: &str) {
        self(line)
    }
}

/// Forwards lines to `tracing` at WARN level.
pub struct TracingSink {
    prefix: String,
}

impl TracingSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("stored: ")
    }
}

impl LogSink for TracingSink {
    fn log(&self, line: &str) {
        tracing::warn!("{}{}", self.prefix, line);
    }
}

pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn log(&self, _line: &str) {}
}

/// Keeps every line in memory.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LogSink for MemorySink {
    fn log(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}
