//! Priority merge of package file mappings.
use std::collections::BTreeMap;

use super::context::ScaffoldContext;
use super::file::ScaffoldFile;
use super::path::ScaffoldFilePath;
use crate::config::PackageRecord;
use crate::error::ScaffoldError;
use crate::mapping::{MappingAction, MappingEntry, normalize};
use crate::resources::{Operation, RemoveOp, ReplaceOp, SkipOp};

/// Files one package declared, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFiles {
    name: String,
    files: Vec<ScaffoldFile>,
}

impl PackageFiles {
    /// Declaring package.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared files, live or overridden.
    #[must_use]
    pub fn files(&self) -> &[ScaffoldFile] {
        &self.files
    }
}

/// Every declaration grouped by package, plus the live owner of each
/// destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCollection {
    packages: Vec<PackageFiles>,
    live: BTreeMap<String, String>,
}

impl ResolvedCollection {
    /// Declaring packages in priority order.
    #[must_use]
    pub fn packages(&self) -> &[PackageFiles] {
        &self.packages
    }

    /// Package that owns `dest_rel_path` after resolution.
    #[must_use]
    pub fn live_owner(&self, dest_rel_path: &str) -> Option<&str> {
        self.live.get(dest_rel_path).map(String::as_str)
    }

    /// Whether `file` is the winning declaration for its destination.
    #[must_use]
    pub fn is_live(&self, file: &ScaffoldFile) -> bool {
        self.live_owner(file.destination().rel_path()) == Some(file.package_name())
    }

    /// Winning declarations, in package then declaration order.
    pub fn live_files(&self) -> impl Iterator<Item = &ScaffoldFile> {
        self.packages
            .iter()
            .flat_map(|group| group.files.iter())
            .filter(|file| self.is_live(file))
    }

    /// Number of distinct destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no package declared anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Merge `packages` (lowest priority first) into a [`ResolvedCollection`].
///
/// For each destination the last package to declare it becomes the live
/// owner, and its record remembers the package it displaced. Earlier
/// declarations stay in their package's group for reporting.
///
/// Nothing touches the filesystem.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if a mapping is malformed or a destination
/// names an unknown location token.
pub fn resolve(
    packages: &[PackageRecord],
    ctx: &ScaffoldContext,
) -> Result<ResolvedCollection, ScaffoldError> {
    let mut collection = ResolvedCollection::default();

    for package in packages {
        let entries = normalize(&package.name, &package.file_mapping)?;
        let mut files: Vec<ScaffoldFile> = Vec::with_capacity(entries.len());

        for entry in entries {
            let operation = build_operation(package, entry, ctx)?;
            let key = operation.destination().rel_path().to_string();

            // Two keys in one package can render to the same path.
            if let Some(existing) = files
                .iter_mut()
                .find(|f| f.destination().rel_path() == key)
            {
                let overrides = existing.take_overrides();
                *existing = ScaffoldFile::new(operation, overrides);
                continue;
            }

            let overrides = collection.live.insert(key, package.name.clone());
            if let Some(previous) = &overrides {
                tracing::debug!(
                    "{} overrides {previous} for {}",
                    package.name,
                    operation.destination().rel_path()
                );
            }
            files.push(ScaffoldFile::new(operation, overrides));
        }

        if !files.is_empty() {
            collection.packages.push(PackageFiles {
                name: package.name.clone(),
                files,
            });
        }
    }

    Ok(collection)
}

fn build_operation(
    package: &PackageRecord,
    entry: MappingEntry,
    ctx: &ScaffoldContext,
) -> Result<Operation, ScaffoldError> {
    let destination = ScaffoldFilePath::destination(&package.name, &entry.destination, ctx)?;
    Ok(match entry.action {
        MappingAction::Replace { source, overwrite } => Operation::Replace(ReplaceOp::new(
            ScaffoldFilePath::source(&package.name, &package.root, &entry.destination, &source)?,
            destination,
            package.options.symlink,
            overwrite.unwrap_or(package.options.overwrite),
        )),
        MappingAction::Skip => Operation::Skip(SkipOp::new(destination)),
        MappingAction::Remove => Operation::Remove(RemoveOp::new(destination)),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::ScaffoldOptions;
    use crate::error::{ConfigError, ValidationError};
    use crate::mapping::{FileMapping, RawMapping};
    use crate::scaffold::context::Locations;

    fn ctx() -> ScaffoldContext {
        ScaffoldContext::new("/p", Locations::new([("web-root", "web")]).unwrap())
    }

    fn package(name: &str, entries: &[(&str, RawMapping)]) -> PackageRecord {
        PackageRecord::new(
            name,
            format!("/p/vendor/{name}"),
            entries.iter().cloned().collect::<FileMapping>(),
        )
    }

    fn path(p: &str) -> RawMapping {
        RawMapping::Path(p.to_string())
    }

    #[test]
    fn later_package_owns_destination() {
        let packages = [
            package("core", &[("robots.txt", path("assets/robots.txt"))]),
            package("site", &[("robots.txt", path("custom/robots.txt"))]),
        ];
        let collection = resolve(&packages, &ctx()).unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.live_owner("robots.txt"), Some("site"));

        let live: Vec<&ScaffoldFile> = collection.live_files().collect();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].package_name(), "site");
        assert_eq!(live[0].overrides(), Some("core"));
        assert_eq!(
            live[0].operation().source().map(ScaffoldFilePath::rel_path),
            Some("custom/robots.txt")
        );

        // The losing declaration is still grouped under its package.
        assert_eq!(collection.packages()[0].name(), "core");
        assert!(!collection.is_live(&collection.packages()[0].files()[0]));
    }

    #[test]
    fn only_immediate_predecessor_is_recorded() {
        let packages = [
            package("a", &[("x", path("x"))]),
            package("b", &[("x", path("x"))]),
            package("c", &[("x", path("x"))]),
        ];
        let collection = resolve(&packages, &ctx()).unwrap();
        let overrides: Vec<Option<&str>> = collection
            .packages()
            .iter()
            .map(|g| g.files()[0].overrides())
            .collect();
        assert_eq!(overrides, vec![None, Some("a"), Some("b")]);
        assert_eq!(collection.live_owner("x"), Some("c"));
    }

    #[test]
    fn removal_participates_in_precedence() {
        let packages = [
            package("core", &[("legacy.php", RawMapping::Flag(false))]),
            package("site", &[("legacy.php", path("keep/legacy.php"))]),
        ];
        let collection = resolve(&packages, &ctx()).unwrap();
        let live: Vec<&ScaffoldFile> = collection.live_files().collect();
        assert_eq!(live[0].operation().kind_label(), "copy");

        let packages = [
            package("core", &[("legacy.php", path("legacy.php"))]),
            package("site", &[("legacy.php", RawMapping::Flag(false))]),
        ];
        let collection = resolve(&packages, &ctx()).unwrap();
        let live: Vec<&ScaffoldFile> = collection.live_files().collect();
        assert_eq!(live[0].operation().kind_label(), "remove");
    }

    #[test]
    fn tokens_and_plain_keys_share_a_destination() {
        let packages = [
            package("core", &[("[web-root]/robots.txt", path("a"))]),
            package("site", &[("web/robots.txt", path("b"))]),
        ];
        let collection = resolve(&packages, &ctx()).unwrap();
        assert_eq!(collection.live_owner("web/robots.txt"), Some("site"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn same_package_collision_keeps_first_position() {
        let packages = [
            package("core", &[("x", path("x"))]),
            package(
                "site",
                &[
                    ("[web-root]/a", path("first")),
                    ("y", path("y")),
                    ("web/a", path("second")),
                ],
            ),
        ];
        let collection = resolve(&packages, &ctx()).unwrap();
        let site = &collection.packages()[1];
        assert_eq!(site.files().len(), 2);
        assert_eq!(site.files()[0].destination().rel_path(), "web/a");
        assert_eq!(
            site.files()[0].operation().source().map(ScaffoldFilePath::rel_path),
            Some("second")
        );
    }

    #[test]
    fn flags_belong_to_the_declaring_package() {
        let core = package("core", &[("a", path("a")), ("b", path("b"))]).with_options(
            ScaffoldOptions {
                symlink: true,
                overwrite: false,
                ..ScaffoldOptions::default()
            },
        );
        let site = package("site", &[("a", path("a"))]);
        let collection = resolve(&[core, site], &ctx()).unwrap();
        let labels: Vec<(&str, &str)> = collection
            .live_files()
            .map(|f| (f.destination().rel_path(), f.operation().kind_label()))
            .collect();
        assert_eq!(labels, vec![("b", "link"), ("a", "copy")]);
        assert!(matches!(
            collection.live_files().nth(1).unwrap().operation(),
            Operation::Replace(op) if op.overwrite
        ));
    }

    #[test]
    fn entry_overwrite_beats_package_default() {
        let core = package(
            "core",
            &[(
                "a",
                RawMapping::Table(crate::mapping::MappingTable {
                    path: Some("a".to_string()),
                    overwrite: Some(false),
                    ..crate::mapping::MappingTable::default()
                }),
            )],
        );
        let collection = resolve(&[core], &ctx()).unwrap();
        assert!(matches!(
            collection.live_files().next().unwrap().operation(),
            Operation::Replace(op) if !op.overwrite
        ));
    }

    #[test]
    fn unknown_token_is_config_error() {
        let packages = [package("core", &[("[app-root]/x", path("x"))])];
        let err = resolve(&packages, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Config(ConfigError::MissingToken { .. })
        ));
    }

    #[test]
    fn validation_error_surfaces() {
        let packages = [package("core", &[("x", RawMapping::Flag(true))])];
        let err = resolve(&packages, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Validation(ValidationError::MeaninglessTrue { .. })
        ));
    }

    #[test]
    fn source_climbing_out_of_package_is_rejected() {
        let packages = [package("site", &[("robots.txt", path("assets/../robots.txt"))])];
        let err = resolve(&packages, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Validation(ValidationError::UnsafeSource { ref package, .. }) if package == "site"
        ));
    }

    #[test]
    fn absolute_source_is_rejected() {
        let packages = [package("core", &[("leak.txt", path("/tmp/secret"))])];
        let err = resolve(&packages, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Validation(ValidationError::UnsafeSource { .. })
        ));
    }

    #[test]
    fn empty_packages_produce_no_groups() {
        let packages = [package("core", &[])];
        let collection = resolve(&packages, &ctx()).unwrap();
        assert!(collection.is_empty());
        assert!(collection.packages().is_empty());
    }
}
