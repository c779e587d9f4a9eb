//! Command: print version information.
use crate::logging::Log;

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SCAFFOLD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the scaffold version.
pub fn run(log: &dyn Log) {
    log.info(&format!("scaffold {}", version()));
}
