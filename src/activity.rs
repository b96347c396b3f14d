//! Human-readable activity log for a working batch.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tracing::{info, warn};

/// Number of entries kept; older ones fall off.
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub kind: LogKind,
}

/// Append-only, most-recent-first log capped at [`LOG_CAPACITY`] entries.
///
/// Purely observational; every entry is mirrored to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: LogKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            LogKind::Error => warn!("{message}"),
            LogKind::Info | LogKind::Success => info!("{message}"),
        }
        self.entries.push_front(LogEntry {
            timestamp: Local::now(),
            message,
            kind,
        });
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(LogKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.record(LogKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(LogKind::Error, message);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
