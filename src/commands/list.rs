//! Command: show the resolved destination owners.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, ListOpts};
use crate::logging::Log;
use crate::scaffold::{ResolvedCollection, ScaffoldFile};

/// Run the list command. Nothing is written.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or resolved.
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &dyn Log) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    log.stage("Scaffold files");
    for line in listing(&setup.collection, opts.all) {
        log.info(&line);
    }
    Ok(())
}

/// One line per live destination (and, with `all`, per overridden one):
/// `<dest> <verb> by <package>` plus the package it displaced.
#[must_use]
pub fn listing(collection: &ResolvedCollection, all: bool) -> Vec<String> {
    if !all {
        return collection.live_files().map(live_line).collect();
    }
    let mut lines = Vec::new();
    for group in collection.packages() {
        for file in group.files() {
            if collection.is_live(file) {
                lines.push(live_line(file));
            } else {
                let dest = file.destination().rel_path();
                let winner = collection.live_owner(dest).unwrap_or("?");
                lines.push(format!("  {dest} ({} overridden in {winner})", group.name()));
            }
        }
    }
    lines
}

fn live_line(file: &ScaffoldFile) -> String {
    let mut line = format!(
        "  {} ({} by {})",
        file.destination().rel_path(),
        file.operation().kind_label(),
        file.package_name()
    );
    if let Some(previous) = file.overrides() {
        line.push_str(", overrides ");
        line.push_str(previous);
    }
    line
}
