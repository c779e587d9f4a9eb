//! Filesystem primitive abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that scaffold operations can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::io;
use std::path::Path;

/// The filesystem calls a scaffold run is allowed to make.
///
/// Every mutation the engine performs goes through one of these methods, in
/// order, one destination at a time.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if anything exists at `path`, including a broken
    /// symlink.
    fn exists(&self, path: &Path) -> bool;

    /// Remove the file, symlink or directory tree at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Create `path` and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy the contents of the file at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` cannot be read or `to` cannot be written.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create a symlink at `link` whose stored target is `target`.
    ///
    /// `target` is usually relative to the directory containing `link`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        let meta = std::fs::symlink_metadata(path)?;
        if meta.is_symlink() && is_dir_like(&meta) {
            std::fs::remove_dir(path)
        } else if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::copy(from, to).map(|_| ())
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }

        #[cfg(windows)]
        {
            // The stored target is relative to the link's directory.
            let resolved = link.parent().map_or_else(|| target.to_path_buf(), |p| p.join(target));
            if resolved.is_dir() {
                std::os::windows::fs::symlink_dir(target, link)
            } else {
                std::os::windows::fs::symlink_file(target, link)
            }
        }
    }
}

/// Check if metadata represents a directory-like entry.
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory symlinks,
/// so we check the raw `FILE_ATTRIBUTE_DIRECTORY` bit instead.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        let _ = meta;
        false
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Holds an in-memory tree of files, symlinks and directories, and records
/// every mutating call so tests can assert that a run made no changes.
///
/// # Example
///
/// ```ignore
/// use scaffold_files::operations::MockFileSystemOps;
///
/// let fs = MockFileSystemOps::new()
///     .with_file("/pkg/assets/robots.txt", "User-agent: *")
///     .with_dir("/project/web");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    entries: std::sync::Mutex<std::collections::BTreeMap<std::path::PathBuf, MockEntry>>,
    mutations: std::sync::Mutex<Vec<String>>,
    fail_on: Option<std::path::PathBuf>,
}

/// A node in the mock filesystem.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEntry {
    /// Regular file with its contents.
    File(String),
    /// Symlink with its stored (possibly relative) target.
    Link(std::path::PathBuf),
    /// Directory.
    Dir,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file with `contents`.
    #[must_use]
    pub fn with_file(self, path: impl Into<std::path::PathBuf>, contents: &str) -> Self {
        self.insert(path.into(), MockEntry::File(contents.to_string()));
        self
    }

    /// Add a directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.insert(path.into(), MockEntry::Dir);
        self
    }

    /// Make every mutating call that touches `path` fail.
    #[must_use]
    pub fn failing_on(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.fail_on = Some(path.into());
        self
    }

    /// The entry currently stored at `path`.
    #[must_use]
    pub fn entry(&self, path: &Path) -> Option<MockEntry> {
        self.entries
            .lock()
            .expect("mock entries poisoned")
            .get(path)
            .cloned()
    }

    /// Every mutating call made so far, as `"<op> <path>"` strings.
    #[must_use]
    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().expect("mock log poisoned").clone()
    }

    fn insert(&self, path: std::path::PathBuf, entry: MockEntry) {
        self.entries
            .lock()
            .expect("mock entries poisoned")
            .insert(path, entry);
    }

    fn record(&self, op: &str, path: &Path) -> io::Result<()> {
        self.mutations
            .lock()
            .expect("mock log poisoned")
            .push(format!("{op} {}", path.display()));
        if self.fail_on.as_deref() == Some(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mock failure"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.entries
            .lock()
            .expect("mock entries poisoned")
            .contains_key(path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.record("remove", path)?;
        let mut entries = self.entries.lock().expect("mock entries poisoned");
        if entries.remove(path).is_none() {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        entries.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record("mkdir", path)?;
        let mut entries = self.entries.lock().expect("mock entries poisoned");
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.record("copy", to)?;
        let mut entries = self.entries.lock().expect("mock entries poisoned");
        let Some(MockEntry::File(contents)) = entries.get(from).cloned() else {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        };
        entries.insert(to.to_path_buf(), MockEntry::File(contents));
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        self.record("symlink", link)?;
        let mut entries = self.entries.lock().expect("mock entries poisoned");
        if entries.contains_key(link) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        entries.insert(link.to_path_buf(), MockEntry::Link(target.to_path_buf()));
        Ok(())
    }
}
