//! Execution driver: report overrides and apply live operations.
use super::context::ScaffoldContext;
use super::resolve::ResolvedCollection;
use crate::error::ScaffoldError;
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::resources::{Applicable, ResourceChange};

/// Options for [`execute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOpts {
    /// Print what would happen without touching the filesystem.
    pub dry_run: bool,
}

/// Counters for a scaffold run.
///
/// # Examples
///
/// ```
/// use scaffold_files::scaffold::ScaffoldStats;
///
/// let stats = ScaffoldStats { changed: 2, already_ok: 0, skipped: 1, overridden: 1 };
/// assert_eq!(stats.summary(false), "2 changed, 0 already ok, 1 skipped, 1 overridden");
/// assert_eq!(stats.summary(true), "2 would change, 0 already ok, 1 skipped, 1 overridden");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldStats {
    /// Destinations created, replaced or deleted.
    pub changed: u32,
    /// Destinations that needed no change.
    pub already_ok: u32,
    /// Destinations left alone (disabled or refused overwrite).
    pub skipped: u32,
    /// Declarations that lost to a later package.
    pub overridden: u32,
}

impl ScaffoldStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        format!(
            "{} {verb}, {} already ok, {} skipped, {} overridden",
            self.changed, self.already_ok, self.skipped, self.overridden
        )
    }

    fn record(&mut self, change: &ResourceChange) {
        match change {
            ResourceChange::Applied => self.changed += 1,
            ResourceChange::AlreadyCorrect => self.already_ok += 1,
            ResourceChange::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Walk `collection` package by package and materialize the live files.
///
/// Every declaration is reported exactly once: overridden ones name the
/// winning package, live ones print their operation's status line. Location
/// directories are created first unless this is a dry run, which reports
/// each operation's read-only preview instead.
///
/// # Errors
///
/// Stops at the first failing operation and returns its error. Operations
/// already applied are not rolled back.
pub fn execute(
    collection: &ResolvedCollection,
    ctx: &ScaffoldContext,
    fs: &dyn FileSystemOps,
    log: &dyn Log,
    opts: ExecuteOpts,
) -> Result<ScaffoldStats, ScaffoldError> {
    let mut stats = ScaffoldStats::new();

    if !opts.dry_run {
        ctx.ensure_locations(fs)?;
    }

    for group in collection.packages() {
        log.info(&format!("Scaffolding files for {}:", group.name()));

        for file in group.files() {
            let rel_path = file.destination().rel_path();
            match collection.live_owner(rel_path) {
                Some(owner) if owner != group.name() => {
                    log.info(&file.overridden_line(owner));
                    stats.overridden += 1;
                }
                _ if opts.dry_run => {
                    let preview = file.preview(fs);
                    log.dry_run(&preview.status);
                    stats.record(&preview.change);
                }
                _ => {
                    let applied = file.apply(fs)?;
                    log.info(&applied.status);
                    if let ResourceChange::Skipped { reason } = &applied.change {
                        log.debug(&format!("{rel_path}: {reason}"));
                    }
                    stats.record(&applied.change);
                }
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::{PackageRecord, ScaffoldOptions};
    use crate::error::OperationError;
    use crate::logging::BufferedLog;
    use crate::mapping::{FileMapping, MappingMode, MappingTable, RawMapping};
    use crate::operations::{MockEntry, MockFileSystemOps};
    use crate::scaffold::context::Locations;
    use crate::scaffold::resolve::resolve;

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

    fn run(
        packages: &[PackageRecord],
        fs: &MockFileSystemOps,
        dry_run: bool,
    ) -> (Result<ScaffoldStats, ScaffoldError>, Vec<String>) {
        let ctx = ctx();
        let collection = resolve(packages, &ctx).unwrap();
        let log = BufferedLog::new();
        let result = execute(&collection, &ctx, fs, &log, ExecuteOpts { dry_run });
        (result, log.lines())
    }

    #[test]
    fn override_is_reported_and_winner_applied() {
        let fs = MockFileSystemOps::new()
            .with_dir("/p/web")
            .with_file("/p/vendor/core/assets/robots.txt", "core")
            .with_file("/p/vendor/site/custom/robots.txt", "site");
        let packages = [
            package("core", &[("[web-root]/robots.txt", path("assets/robots.txt"))]),
            package("site", &[("[web-root]/robots.txt", path("custom/robots.txt"))]),
        ];
        let (result, lines) = run(&packages, &fs, false);
        let stats = result.unwrap();

        assert_eq!(
            lines,
            vec![
                "Scaffolding files for core:",
                "  - web/robots.txt overridden in site",
                "Scaffolding files for site:",
                "  - Copy web/robots.txt from custom/robots.txt",
            ]
        );
        assert_eq!(
            fs.entry(Path::new("/p/web/robots.txt")),
            Some(MockEntry::File("site".to_string()))
        );
        assert_eq!(stats.changed, 1);
        assert_eq!(stats.overridden, 1);
    }

    #[test]
    fn remove_reports_success_when_absent() {
        let fs = MockFileSystemOps::new().with_dir("/p/web");
        let packages = [package("core", &[("legacy.php", RawMapping::Flag(false))])];
        let (result, lines) = run(&packages, &fs, false);
        assert_eq!(result.unwrap().already_ok, 1);
        assert_eq!(lines[1], "  - Remove legacy.php");
    }

    #[test]
    fn overwrite_false_second_run_makes_no_mutations() {
        let fs = MockFileSystemOps::new()
            .with_dir("/p/web")
            .with_file("/p/vendor/core/assets/robots.txt", "core");
        let packages = [package("core", &[("[web-root]/robots.txt", path("assets/robots.txt"))])
            .with_options(ScaffoldOptions {
                overwrite: false,
                ..ScaffoldOptions::default()
            })];

        let (first, _) = run(&packages, &fs, false);
        assert_eq!(first.unwrap().changed, 1);
        let before = fs.mutations().len();

        let (second, lines) = run(&packages, &fs, false);
        assert_eq!(second.unwrap().skipped, 1);
        assert_eq!(fs.mutations().len(), before);
        assert_eq!(
            lines[1],
            "  - Skip scaffold file web/robots.txt because it already exists."
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let fs = MockFileSystemOps::new().with_file("/p/vendor/core/a.txt", "a");
        let packages = [package(
            "core",
            &[
                ("[web-root]/a.txt", path("a.txt")),
                (
                    "[web-root]/b.txt",
                    RawMapping::Table(MappingTable {
                        mode: MappingMode::Skip,
                        ..MappingTable::default()
                    }),
                ),
            ],
        )];
        let (result, lines) = run(&packages, &fs, true);
        let stats = result.unwrap();

        assert!(fs.mutations().is_empty());
        assert_eq!(
            lines,
            vec![
                "Scaffolding files for core:",
                "[DRY RUN]   - Copy web/a.txt from a.txt",
                "[DRY RUN]   - Skip web/b.txt: disabled",
            ]
        );
        assert_eq!(stats.summary(true), "1 would change, 0 already ok, 1 skipped, 0 overridden");
    }

    #[test]
    fn dry_run_reports_kept_files_as_skipped() {
        let fs = MockFileSystemOps::new()
            .with_dir("/p/web")
            .with_file("/p/vendor/core/a.txt", "new")
            .with_file("/p/web/a.txt", "customised");
        let packages = [package("core", &[("[web-root]/a.txt", path("a.txt"))]).with_options(
            ScaffoldOptions {
                overwrite: false,
                ..ScaffoldOptions::default()
            },
        )];
        let (result, lines) = run(&packages, &fs, true);

        assert_eq!(
            lines[1],
            "[DRY RUN]   - Skip scaffold file web/a.txt because it already exists."
        );
        assert_eq!(
            result.unwrap().summary(true),
            "0 would change, 0 already ok, 1 skipped, 0 overridden"
        );
        assert!(fs.mutations().is_empty());
    }

    #[test]
    fn later_removal_deletes_earlier_replacement() {
        let fs = MockFileSystemOps::new()
            .with_dir("/p/web")
            .with_file("/p/vendor/core/legacy.php", "core");
        let core = [package("core", &[("legacy.php", path("legacy.php"))])];
        run(&core, &fs, false).0.unwrap();
        assert!(fs.exists(Path::new("/p/legacy.php")));

        let both = [
            package("core", &[("legacy.php", path("legacy.php"))]),
            package("site", &[("legacy.php", RawMapping::Flag(false))]),
        ];
        let (result, lines) = run(&both, &fs, false);
        assert_eq!(result.unwrap().changed, 1);
        assert_eq!(lines[3], "  - Remove legacy.php");
        assert!(!fs.exists(Path::new("/p/legacy.php")));
    }

    #[test]
    fn first_failure_stops_execution() {
        let fs = MockFileSystemOps::new()
            .with_dir("/p/web")
            .with_file("/p/vendor/core/b.txt", "b");
        let packages = [package(
            "core",
            &[("[web-root]/a.txt", path("a.txt")), ("[web-root]/b.txt", path("b.txt"))],
        )];
        let (result, lines) = run(&packages, &fs, false);
        assert!(matches!(
            result,
            Err(ScaffoldError::Operation(OperationError::SourceMissing { .. }))
        ));
        assert_eq!(lines, vec!["Scaffolding files for core:"]);
        assert!(!fs.exists(Path::new("/p/web/b.txt")));
    }

    #[test]
    fn location_directories_are_created() {
        let fs = MockFileSystemOps::new().with_dir("/p");
        let (result, _) = run(&[], &fs, false);
        assert_eq!(result.unwrap(), ScaffoldStats::default());
        assert!(fs.exists(Path::new("/p/web")));
    }
}
