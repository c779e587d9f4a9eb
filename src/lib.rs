//! Scaffold file engine.
//!
//! Packages declare files they want placed into a project (copied, linked,
//! disabled or removed). The engine merges every declaration by package
//! priority, reports which declarations were overridden, and applies the
//! winning operation for each destination.
//!
//! The public API is organised into these layers:
//!
//! - **[`mapping`]**: parse and validate raw file-mapping declarations
//! - **[`config`]**: load the manifest and expand allowed packages
//! - **[`scaffold`]**: resolve declarations by priority and execute them
//! - **[`resources`]**: idempotent `describe + apply` operations (copy, link, remove, …)
//! - **[`commands`]**: top-level subcommand orchestration (`apply`, `list`, `version`)
//!
//! ```
//! use scaffold_files::config::PackageRecord;
//! use scaffold_files::mapping::{FileMapping, RawMapping};
//! use scaffold_files::scaffold::{Locations, ScaffoldContext, resolve};
//!
//! let ctx = ScaffoldContext::new("/project", Locations::default());
//! let core = PackageRecord::new(
//!     "acme/core",
//!     "/project/vendor/acme/core",
//!     FileMapping::new().with("robots.txt", RawMapping::Path("assets/robots.txt".into())),
//! );
//! let site = PackageRecord::new(
//!     "acme/site",
//!     "/project",
//!     FileMapping::new().with("robots.txt", RawMapping::Path("custom/robots.txt".into())),
//! );
//!
//! let collection = resolve(&[core, site], &ctx)?;
//! assert_eq!(collection.live_owner("robots.txt"), Some("acme/site"));
//! # Ok::<(), scaffold_files::error::ScaffoldError>(())
//! ```
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod interpolate;
pub mod logging;
pub mod mapping;
pub mod operations;
pub mod resources;
pub mod scaffold;
