//! Package records handed to the resolution engine.
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::mapping::FileMapping;

/// Options a package declares for its own scaffold files.
///
/// Flags apply only to the declaring package's entries; they are never
/// merged with another package's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Link files instead of copying them.
    pub symlink: bool,
    /// Replace destinations that already exist.
    pub overwrite: bool,
    /// Packages whose scaffold files this package accepts.
    pub allowed_packages: Vec<String>,
    /// Location tokens; only the project's are used.
    pub locations: BTreeMap<String, String>,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            symlink: false,
            overwrite: true,
            allowed_packages: Vec::new(),
            locations: BTreeMap::new(),
        }
    }
}

/// One package taking part in a scaffold run.
///
/// Priority is the record's position in the list passed to
/// [`resolve`](crate::scaffold::resolve): later records win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Unique package identifier, e.g. `acme/core`.
    pub name: String,
    /// Absolute directory that source paths are relative to.
    pub root: PathBuf,
    /// Raw file mapping in declaration order.
    pub file_mapping: FileMapping,
    /// Declared options.
    pub options: ScaffoldOptions,
}

impl PackageRecord {
    /// Create a record with default options.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, file_mapping: FileMapping) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            file_mapping,
            options: ScaffoldOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: ScaffoldOptions) -> Self {
        self.options = options;
        self
    }
}
