//! Manifest-backed package source.
pub mod allowed;
pub mod loader;
pub mod manifest;
pub mod package;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scaffold::context::{Locations, ScaffoldContext};

pub use package::{PackageRecord, ScaffoldOptions};

/// Manifest file names looked up in the project root, in order.
pub const MANIFEST_NAMES: [&str; 2] = ["scaffold.toml", "scaffold.json"];

/// Everything a scaffold run needs from the manifest.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute project root.
    pub root: PathBuf,
    /// Manifest the configuration was read from.
    pub manifest_path: PathBuf,
    /// Validated location tokens.
    pub locations: Locations,
    /// Packages in ascending priority; the project is last.
    pub packages: Vec<PackageRecord>,
}

impl Config {
    /// Load the manifest at `manifest_path` for the project at `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the manifest cannot be read or parsed,
    /// a location is invalid, or an allow-list names an unknown package.
    pub fn load(root: &Path, manifest_path: &Path) -> Result<Self, ConfigError> {
        let manifest: manifest::Manifest = loader::load_document(manifest_path)?;
        let project = &manifest.project;

        let locations = Locations::new(&project.locations)?;

        let order = allowed::expand_allowed(
            &project.name,
            &project.allowed_packages,
            &manifest.packages,
        )?;
        let mut packages: Vec<PackageRecord> = order
            .iter()
            .filter_map(|name| {
                manifest
                    .packages
                    .get(name)
                    .map(|section| section.record(name, root))
            })
            .collect();
        packages.push(project.record(root));

        tracing::debug!(
            "loaded {} with {} package(s)",
            manifest_path.display(),
            packages.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            manifest_path: manifest_path.to_path_buf(),
            locations,
            packages,
        })
    }

    /// Immutable context for resolution and execution.
    #[must_use]
    pub fn context(&self) -> ScaffoldContext {
        ScaffoldContext::new(&self.root, self.locations.clone())
    }
}

/// First manifest that exists in `root`, or the default TOML name.
#[must_use]
pub fn find_manifest(root: &Path) -> PathBuf {
    MANIFEST_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| root.join(MANIFEST_NAMES[0]))
}
