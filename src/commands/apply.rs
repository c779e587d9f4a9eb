//! Command: resolve and write scaffold files.
use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::scaffold::{ExecuteOpts, ScaffoldStats, execute};

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if loading, resolution, or any file operation fails.
pub fn run(global: &GlobalOpts, fs: &dyn FileSystemOps, log: &dyn Log) -> Result<ScaffoldStats> {
    let setup = CommandSetup::init(global, log)?;

    log.stage(if global.dry_run {
        "Scaffolding (dry run)"
    } else {
        "Scaffolding"
    });
    if setup.collection.is_empty() {
        log.info("no scaffold files declared");
    }

    let stats = execute(
        &setup.collection,
        &setup.context,
        fs,
        log,
        ExecuteOpts {
            dry_run: global.dry_run,
        },
    )
    .context("scaffolding files")?;

    log.info(&stats.summary(global.dry_run));
    Ok(stats)
}
