//! Top-level subcommand orchestration.
pub mod apply;
pub mod list;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::logging::Log;
use crate::scaffold::{ResolvedCollection, ScaffoldContext, resolve};

/// Environment variable consulted when `--root` is not given.
pub const ROOT_ENV: &str = "SCAFFOLD_ROOT";

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates root detection, manifest loading and resolution so each
/// command does not repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded configuration.
    pub config: Config,
    /// Run context built from the configuration.
    pub context: ScaffoldContext,
    /// Resolved scaffold files.
    pub collection: ResolvedCollection,
}

impl CommandSetup {
    /// Resolve the root, load the manifest and resolve every package.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be determined, the manifest fails
    /// to load, or a package declares an invalid mapping.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let root = resolve_root(global)?;
        let manifest = manifest_path(global, &root);

        log.stage("Loading manifest");
        let config = Config::load(&root, &manifest)
            .with_context(|| format!("loading {}", manifest.display()))?;
        log.debug(&format!("root: {}", root.display()));
        for (token, dir) in config.locations.iter() {
            log.debug(&format!("location [{token}] = {dir}"));
        }
        log.info(&format!(
            "loaded {} package(s) from {}",
            config.packages.len(),
            manifest.display()
        ));

        let context = config.context();
        let collection = resolve(&config.packages, &context).context("resolving scaffold files")?;
        log.debug(&format!("{} destination(s) resolved", collection.len()));

        Ok(Self {
            config,
            context,
            collection,
        })
    }
}

/// Determine the project root.
///
/// Order: `--root`, then `SCAFFOLD_ROOT`, then the current directory. The
/// result is canonicalized without a Windows verbatim prefix.
///
/// # Errors
///
/// Returns an error if the chosen directory does not exist.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let candidate = match (&global.root, std::env::var_os(ROOT_ENV)) {
        (Some(root), _) => root.clone(),
        (None, Some(env)) if !env.is_empty() => PathBuf::from(env),
        _ => std::env::current_dir().context("reading current directory")?,
    };
    dunce::canonicalize(&candidate)
        .with_context(|| format!("cannot use project root {}", candidate.display()))
}

/// Manifest path: `--manifest` (relative to `root` unless absolute) or
/// the first manifest found in `root`.
#[must_use]
pub fn manifest_path(global: &GlobalOpts, root: &Path) -> PathBuf {
    global
        .manifest
        .as_ref()
        .map_or_else(|| config::find_manifest(root), |m| root.join(m))
}
