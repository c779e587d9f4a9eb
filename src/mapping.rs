//! Raw file-mapping declarations and their normalization.
//!
//! A package declares its scaffold files as an ordered table of destination
//! keys to values:
//!
//! ```toml
//! [packages."acme/core".file-mapping]
//! "[web-root]/robots.txt" = "assets/robots.txt"        # replace
//! "[web-root]/legacy.php" = false                      # remove
//! "[web-root]/.htaccess" = { mode = "skip" }           # disabled
//! "[web-root]/sites/default.settings.php" = { path = "assets/default.settings.php", overwrite = false }
//! ```
use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::error::ValidationError;

/// One raw value from a file mapping, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawMapping {
    /// `false` removes the destination; `true` is rejected.
    Flag(bool),
    /// Source path relative to the declaring package.
    Path(String),
    /// Structured form with an explicit mode.
    Table(MappingTable),
}

/// Structured mapping value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MappingTable {
    /// Operation to perform; defaults to `replace`.
    #[serde(default)]
    pub mode: MappingMode,
    /// Source path, required for `replace`.
    #[serde(default)]
    pub path: Option<String>,
    /// Per-entry override of the package's overwrite policy.
    #[serde(default)]
    pub overwrite: Option<bool>,
}

/// Mode of a structured mapping value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMode {
    /// Copy or link the source over the destination.
    #[default]
    Replace,
    /// Leave the destination alone and report it as disabled.
    Skip,
    /// Delete the destination.
    Remove,
}

/// A package's raw file mapping in declaration order.
///
/// Deserializes from any map (TOML table, JSON object) without losing the
/// order entries were written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMapping(Vec<(String, RawMapping)>);

impl FileMapping {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, destination: impl Into<String>, value: RawMapping) -> Self {
        self.insert(destination, value);
        self
    }

    /// Append a declaration. Duplicates are kept and resolved by
    /// [`normalize`].
    pub fn insert(&mut self, destination: impl Into<String>, value: RawMapping) {
        self.0.push((destination.into(), value));
    }

    /// Declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawMapping)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declarations, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawMapping)> for FileMapping {
    fn from_iter<I: IntoIterator<Item = (K, RawMapping)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for FileMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = FileMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of destination paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileMapping, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawMapping>()? {
                    entries.push(entry);
                }
                Ok(FileMapping(entries))
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// A validated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Destination key exactly as declared (may contain location tokens).
    pub destination: String,
    /// What to do with it.
    pub action: MappingAction,
}

/// Normalized action for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingAction {
    /// Copy or link `source` over the destination.
    Replace {
        /// Source path relative to the declaring package.
        source: String,
        /// Entry-level overwrite policy; `None` defers to the package.
        overwrite: Option<bool>,
    },
    /// Leave the destination untouched.
    Skip,
    /// Delete the destination.
    Remove,
}

/// Validate a package's raw mapping.
///
/// Declaration order is preserved. When the same key is declared twice the
/// later value wins and keeps the position of the first declaration.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first offending destination:
/// boolean `true`, an empty source, a `replace` table without a path, or an
/// empty destination key.
pub fn normalize(package: &str, mapping: &FileMapping) -> Result<Vec<MappingEntry>, ValidationError> {
    let mut entries: Vec<MappingEntry> = Vec::with_capacity(mapping.len());
    for (destination, raw) in mapping.iter() {
        let action = normalize_value(package, destination, raw)?;
        if let Some(existing) = entries.iter_mut().find(|e| e.destination == destination) {
            tracing::debug!("{package}: '{destination}' declared twice, keeping the later value");
            existing.action = action;
            continue;
        }
        entries.push(MappingEntry {
            destination: destination.to_string(),
            action,
        });
    }
    Ok(entries)
}

fn normalize_value(
    package: &str,
    destination: &str,
    raw: &RawMapping,
) -> Result<MappingAction, ValidationError> {
    if destination.trim().is_empty() {
        return Err(ValidationError::EmptyDestination {
            package: package.to_string(),
        });
    }
    match raw {
        RawMapping::Flag(false) => Ok(MappingAction::Remove),
        RawMapping::Flag(true) => Err(ValidationError::MeaninglessTrue {
            package: package.to_string(),
            destination: destination.to_string(),
        }),
        RawMapping::Path(source) => replace(package, destination, source, None),
        RawMapping::Table(table) => match table.mode {
            MappingMode::Skip => Ok(MappingAction::Skip),
            MappingMode::Remove => Ok(MappingAction::Remove),
            MappingMode::Replace => match table.path.as_deref() {
                Some(source) => replace(package, destination, source, table.overwrite),
                None => Err(ValidationError::MissingSource {
                    package: package.to_string(),
                    destination: destination.to_string(),
                }),
            },
        },
    }
}

fn replace(
    package: &str,
    destination: &str,
    source: &str,
    overwrite: Option<bool>,
) -> Result<MappingAction, ValidationError> {
    if source.is_empty() {
        return Err(ValidationError::EmptySource {
            package: package.to_string(),
            destination: destination.to_string(),
        });
    }
    Ok(MappingAction::Replace {
        source: source.to_string(),
        overwrite,
    })
}
