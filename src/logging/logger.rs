//! Console logger backed by [`tracing`].
use super::types::{Log, LogEntry};

/// Implement the methods of [`Log`] by replaying the matching
/// [`LogEntry`] variant through tracing.
macro_rules! forward_log_methods {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                LogEntry::$variant(msg.to_string()).replay();
            }
        )+
    };
}

/// Structured logger that emits every message as a tracing event.
///
/// Stage headers and dry-run lines use the `scaffold::stage` and
/// `scaffold::dry_run` targets so the console formatter can style them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Log for Logger {
    forward_log_methods! {
        stage   => Stage,
        info    => Info,
        debug   => Debug,
        warn    => Warn,
        error   => Error,
        dry_run => DryRun,
    }
}
