//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the scaffold engine.
#[derive(Parser, Debug)]
#[command(
    name = "scaffold",
    about = "Resolve and materialize package scaffold files",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the project root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Manifest file (defaults to scaffold.toml or scaffold.json in the root)
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve scaffold files and write them into the project
    Apply,
    /// Show which package provides each destination
    List(ListOpts),
    /// Print version information
    Version,
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ListOpts {
    /// Also show declarations that were overridden
    #[arg(short, long)]
    pub all: bool,
}
