//! Pipeline progress feed.
//!
//! Every entry goes to the `log` facade and is also broadcast to any
//! subscriber (the dashboard shows the latest refresh's steps live).
//!
//! Concurrent pipeline runs share one feed. Each entry carries the id of the
//! run that produced it, so a subscriber filters on [`LogEntry::run`].

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level for dashboard display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Id of the pipeline run, 0 outside a run
    #[serde(default)]
    pub run: u64,
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth for sub-steps
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    fn at(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            run: 0,
            level,
            message: message.into(),
            indent: 0,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::at(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::at(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::at(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at(LogLevel::Error, message)
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_run(mut self, run: u64) -> Self {
        self.run = run;
        self
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Fans log entries out to the `log` facade and to subscribers.
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1024);
        Self { sender }
    }

    pub fn log(&self, entry: LogEntry) {
        let indent = "  ".repeat(entry.indent as usize);
        match entry.level {
            LogLevel::Info => log::info!("[run {}] {}{}", entry.run, indent, entry.message),
            LogLevel::Success => log::info!("[run {}] {}✓ {}", entry.run, indent, entry.message),
            LogLevel::Warning => log::warn!("[run {}] {}{}", entry.run, indent, entry.message),
            LogLevel::Error => log::error!("[run {}] {}{}", entry.run, indent, entry.message),
        }

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

static NEXT_RUN: AtomicU64 = AtomicU64::new(1);

/// Logging handle for one pipeline run. Every entry it sends is tagged with
/// the run id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLog {
    run: u64,
}

impl RunLog {
    /// Allocate a fresh run id.
    pub fn start() -> Self {
        Self {
            run: NEXT_RUN.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    fn send(&self, entry: LogEntry) {
        LOG_BROADCASTER.log(entry.with_run(self.run));
    }

    pub fn info(&self, msg: impl Into<String>) {
        self.send(LogEntry::info(msg));
    }

    pub fn success(&self, msg: impl Into<String>) {
        self.send(LogEntry::success(msg));
    }

    pub fn warning(&self, msg: impl Into<String>) {
        self.send(LogEntry::warning(msg));
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.send(LogEntry::error(msg));
    }

    pub fn info_indent(&self, msg: impl Into<String>, indent: u8) {
        self.send(LogEntry::info(msg).with_indent(indent));
    }
}

/// Drain a subscriber, keeping only the entries of one run.
#[cfg(test)]
pub(crate) fn entries_for_run(rx: &mut broadcast::Receiver<LogEntry>, run: u64) -> Vec<LogEntry> {
    use broadcast::error::TryRecvError;

    let mut entries = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(entry) if entry.run == run => entries.push(entry),
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(LogEntry::success("Reshaped 4 player rows").with_indent(1));

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.message, "Reshaped 4 player rows");
        assert_eq!(entry.indent, 1);
    }

    #[test]
    fn test_log_without_subscribers() {
        let broadcaster = LogBroadcaster::default();
        broadcaster.log(LogEntry::warning("nobody listening"));
    }

    #[test]
    fn test_entry_serialization() {
        let json = serde_json::to_value(LogEntry::error("boom")).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "boom");
        assert_eq!(json["indent"], 0);
        assert_eq!(json["run"], 0);
    }

    #[test]
    fn test_run_ids_are_distinct() {
        let first = RunLog::start();
        let second = RunLog::start();
        assert_ne!(first.run(), second.run());
        assert_ne!(first.run(), 0);
    }

    #[test]
    fn test_run_log_tags_entries() {
        let mut rx = LOG_BROADCASTER.subscribe();
        let run = RunLog::start();
        let other = RunLog::start();

        other.info("other refresh");
        run.warning("No 'multi_aspect' column");
        run.info_indent("features: name, hero", 1);

        let mine = entries_for_run(&mut rx, run.run());
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].level, LogLevel::Warning);
        assert_eq!(mine[1].indent, 1);
    }
}
