//! `scaffold` binary: resolve and materialize package scaffold files.
use anyhow::Result;
use clap::Parser;

use scaffold_files::cli::{Cli, Command};
use scaffold_files::commands;
use scaffold_files::logging::{self, Logger};
use scaffold_files::operations::SystemFileSystemOps;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Logger::new();

    match args.command {
        Command::Apply => commands::apply::run(&args.global, &SystemFileSystemOps, &log).map(|_| ()),
        Command::List(opts) => commands::list::run(&args.global, &opts, &log),
        Command::Version => {
            commands::version::run(&log);
            Ok(())
        }
    }
}
