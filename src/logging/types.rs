//! Core logging types: log entries and the [`Log`] trait.

/// One message routed through a [`Log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A stage header entry.
    Stage(String),
    /// An informational entry.
    Info(String),
    /// A debug entry.
    Debug(String),
    /// A warning entry.
    Warn(String),
    /// An error entry.
    Error(String),
    /// A dry-run entry.
    DryRun(String),
}

impl LogEntry {
    /// Plain-text rendering matching the console layout without colors.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Stage(msg) => format!("==> {msg}"),
            Self::Info(msg) => msg.clone(),
            Self::Debug(msg) => format!("[debug] {msg}"),
            Self::Warn(msg) => format!("WARN  {msg}"),
            Self::Error(msg) => format!("ERROR {msg}"),
            Self::DryRun(msg) => format!("[DRY RUN] {msg}"),
        }
    }

    /// Emit this entry as a tracing event.
    pub fn replay(&self) {
        match self {
            Self::Stage(msg) => tracing::info!(target: "scaffold::stage", "{msg}"),
            Self::Info(msg) => tracing::info!("{msg}"),
            Self::Debug(msg) => tracing::debug!("{msg}"),
            Self::Warn(msg) => tracing::warn!("{msg}"),
            Self::Error(msg) => tracing::error!("{msg}"),
            Self::DryRun(msg) => tracing::info!(target: "scaffold::dry_run", "{msg}"),
        }
    }
}

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (direct output) and
/// [`BufferedLog`](super::buffered::BufferedLog) (captured output) implement
/// this trait, so the engine reports status lines without knowing where they
/// end up.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_levels() {
        assert_eq!(LogEntry::Stage("Scaffold".into()).render(), "==> Scaffold");
        assert_eq!(LogEntry::Info("  - Remove a".into()).render(), "  - Remove a");
        assert_eq!(
            LogEntry::DryRun("  - Remove a".into()).render(),
            "[DRY RUN]   - Remove a"
        );
        assert_eq!(LogEntry::Warn("careful".into()).render(), "WARN  careful");
    }
}
