//! In-memory logger that keeps every message.
use std::sync::Mutex;

use super::types::{Log, LogEntry};

/// Implement the methods of [`Log`] by buffering each message into
/// `self.entries` as the corresponding [`LogEntry`] variant.
macro_rules! buffer_log_methods {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push(LogEntry::$variant(msg.to_string()));
                }
            }
        )+
    };
}

/// Buffered logger.
///
/// Captures output in memory instead of printing it, so callers can inspect
/// a run's report as data.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured entry, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Captured entries rendered as plain lines, debug entries excluded.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .iter()
            .filter(|e| !matches!(e, LogEntry::Debug(_)))
            .map(LogEntry::render)
            .collect()
    }
}

impl Log for BufferedLog {
    buffer_log_methods! {
        stage   => Stage,
        info    => Info,
        debug   => Debug,
        warn    => Warn,
        error   => Error,
        dry_run => DryRun,
    }
}
