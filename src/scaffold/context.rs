//! Immutable run context: project root and location tokens.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::path::normalize_relative;
use crate::error::{ConfigError, OperationError};
use crate::interpolate::Interpolator;
use crate::operations::FileSystemOps;

/// Token that always names the project root itself.
pub const PROJECT_ROOT: &str = "project-root";

/// Location tokens mapped to directories relative to the project root.
///
/// `project-root` is always present and maps to `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    entries: BTreeMap<String, String>,
}

impl Default for Locations {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PROJECT_ROOT.to_string(), ".".to_string());
        Self { entries }
    }
}

impl Locations {
    /// Validate and collect declared locations.
    ///
    /// A declaration of `project-root` is ignored; it always maps to `.`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocation`] if a value is absolute or
    /// climbs out of the project with `..`.
    pub fn new<K, V>(declared: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut locations = Self::default();
        for (token, path) in declared {
            let (token, path) = (token.as_ref(), path.as_ref());
            if token == PROJECT_ROOT {
                continue;
            }
            let normalized =
                normalize_relative(path).ok_or_else(|| ConfigError::InvalidLocation {
                    token: token.to_string(),
                    path: path.to_string(),
                })?;
            let value = if normalized.is_empty() {
                ".".to_string()
            } else {
                normalized
            };
            locations.entries.insert(token.to_string(), value);
        }
        Ok(locations)
    }

    /// Relative directory bound to `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Every `(token, relative directory)` pair, sorted by token.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything resolution and execution need to know about the project.
///
/// Built once per run and passed by reference; nothing in the engine reads
/// ambient global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldContext {
    project_root: PathBuf,
    locations: Locations,
    interpolator: Interpolator,
}

impl ScaffoldContext {
    /// Create a context for the project at `project_root`.
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>, locations: Locations) -> Self {
        let interpolator = locations
            .iter()
            .fold(Interpolator::new(), |acc, (token, dir)| acc.with(token, dir));
        Self {
            project_root: project_root.into(),
            locations,
            interpolator,
        }
    }

    /// Absolute project root.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Declared location tokens.
    #[must_use]
    pub const fn locations(&self) -> &Locations {
        &self.locations
    }

    /// Interpolator pre-loaded with every location token.
    #[must_use]
    pub const fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    /// Absolute path of the directory bound to `token`.
    #[must_use]
    pub fn location_dir(&self, token: &str) -> Option<PathBuf> {
        self.locations.get(token).map(|rel| {
            if rel == "." {
                self.project_root.clone()
            } else {
                self.project_root.join(rel)
            }
        })
    }

    /// Create every location directory that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::CreateDirFailed`] for the first directory
    /// that cannot be created.
    pub fn ensure_locations(&self, fs: &dyn FileSystemOps) -> Result<(), OperationError> {
        for (token, _) in self.locations.iter() {
            let Some(dir) = self.location_dir(token) else {
                continue;
            };
            if fs.exists(&dir) {
                continue;
            }
            tracing::debug!("creating location [{token}] at {}", dir.display());
            fs.create_dir_all(&dir)
                .map_err(|source| OperationError::CreateDirFailed {
                    path: dir.display().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}
