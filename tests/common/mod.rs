// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project and a fluent builder so each
// integration test can lay out a manifest and package files without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use scaffold_files::cli::GlobalOpts;
use scaffold_files::commands;
use scaffold_files::logging::BufferedLog;
use scaffold_files::operations::SystemFileSystemOps;
use scaffold_files::scaffold::ScaffoldStats;

/// An isolated project backed by a [`tempfile::TempDir`].
pub struct TestProject {
    /// Temporary directory containing the project.
    pub root: tempfile::TempDir,
}

impl TestProject {
    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the project.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Contents of `rel`, or `None` if it cannot be read.
    pub fn read(&self, rel: &str) -> Option<String> {
        std::fs::read_to_string(self.path(rel)).ok()
    }

    /// Whether anything (including a broken symlink) exists at `rel`.
    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).symlink_metadata().is_ok()
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        write_file(self.root.path(), rel, content);
    }

    /// Options pointing the commands at this project.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            root: Some(self.root.path().to_path_buf()),
            manifest: None,
        }
    }

    /// Run `apply` and return its stats and the report lines.
    pub fn apply(&self) -> (ScaffoldStats, Vec<String>) {
        self.try_apply(false).expect("apply succeeds")
    }

    /// Run `apply`, returning any error.
    pub fn try_apply(&self, dry_run: bool) -> anyhow::Result<(ScaffoldStats, Vec<String>)> {
        let log = BufferedLog::new();
        let stats = commands::apply::run(&self.global(dry_run), &SystemFileSystemOps, &log)?;
        Ok((stats, log.lines()))
    }

    /// Report lines produced by the scaffolding stage only.
    pub fn report(lines: &[String]) -> String {
        lines
            .iter()
            .skip_while(|l| !l.starts_with("==> Scaffolding"))
            .skip(1)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fluent builder for [`TestProject`].
pub struct TestProjectBuilder {
    project: TestProject,
}

impl TestProjectBuilder {
    /// Begin building an empty project.
    pub fn new() -> Self {
        Self {
            project: TestProject {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Write `scaffold.toml`.
    pub fn manifest(self, content: &str) -> Self {
        self.project.write("scaffold.toml", content);
        self
    }

    /// Write an arbitrary file relative to the project root.
    pub fn file(self, rel: &str, content: &str) -> Self {
        self.project.write(rel, content);
        self
    }

    /// Finalise the builder.
    pub fn build(self) -> TestProject {
        self.project
    }
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, content).expect("write file");
}
