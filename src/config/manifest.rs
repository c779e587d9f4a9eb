//! `scaffold.toml` / `scaffold.json` manifest schema.
//!
//! ```toml
//! [project]
//! name = "acme/site"
//! allowed-packages = ["acme/core"]
//!
//! [project.locations]
//! web-root = "web"
//!
//! [project.file-mapping]
//! "[web-root]/robots.txt" = "assets/robots.txt"
//!
//! [packages."acme/core"]
//! path = "vendor/acme/core"
//!
//! [packages."acme/core".file-mapping]
//! "[web-root]/robots.txt" = "assets/robots.txt"
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::package::{PackageRecord, ScaffoldOptions};
use crate::mapping::FileMapping;

/// Top-level manifest document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// The invoking project.
    pub project: ProjectSection,
    /// Installed packages, keyed by identifier.
    #[serde(default)]
    pub packages: BTreeMap<String, PackageSection>,
}

/// `[project]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectSection {
    /// Project identifier.
    pub name: String,
    /// Link the project's own files instead of copying them.
    #[serde(default)]
    pub symlink: bool,
    /// Replace existing destinations (default `true`).
    #[serde(default)]
    pub overwrite: Option<bool>,
    /// Packages whose scaffold files are accepted.
    #[serde(default)]
    pub allowed_packages: Vec<String>,
    /// Location tokens, e.g. `web-root = "web"`.
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    /// The project's own file mapping.
    #[serde(default)]
    pub file_mapping: FileMapping,
}

/// `[packages."<name>"]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackageSection {
    /// Package directory relative to the project root; `vendor/<name>`
    /// when omitted.
    #[serde(default)]
    pub path: Option<String>,
    /// Link this package's files instead of copying them.
    #[serde(default)]
    pub symlink: bool,
    /// Replace existing destinations (default `true`).
    #[serde(default)]
    pub overwrite: Option<bool>,
    /// Further packages this package pulls in.
    #[serde(default)]
    pub allowed_packages: Vec<String>,
    /// Locations declared by the package; informational only.
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    /// The package's file mapping.
    #[serde(default)]
    pub file_mapping: FileMapping,
}

impl ProjectSection {
    /// Record for the project itself, rooted at `project_root`.
    #[must_use]
    pub fn record(&self, project_root: &Path) -> PackageRecord {
        PackageRecord::new(&self.name, project_root, self.file_mapping.clone()).with_options(
            ScaffoldOptions {
                symlink: self.symlink,
                overwrite: self.overwrite.unwrap_or(true),
                allowed_packages: self.allowed_packages.clone(),
                locations: self.locations.clone(),
            },
        )
    }
}

impl PackageSection {
    /// Record for package `name` installed under `project_root`.
    #[must_use]
    pub fn record(&self, name: &str, project_root: &Path) -> PackageRecord {
        let rel = self
            .path
            .clone()
            .unwrap_or_else(|| format!("vendor/{name}"));
        PackageRecord::new(name, project_root.join(rel), self.file_mapping.clone()).with_options(
            ScaffoldOptions {
                symlink: self.symlink,
                overwrite: self.overwrite.unwrap_or(true),
                allowed_packages: self.allowed_packages.clone(),
                locations: self.locations.clone(),
            },
        )
    }
}
