//! File-system resource helpers.
use std::path::{Component, Path, PathBuf};

use crate::error::OperationError;
use crate::operations::FileSystemOps;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// This is a shared helper for operation `apply()` methods that need to
/// create parent directories before writing a file or symlink.
///
/// # Errors
///
/// Returns [`OperationError::CreateDirFailed`] if the directory cannot be
/// created.
pub fn ensure_parent_dir(fs: &dyn FileSystemOps, path: &Path) -> Result<(), OperationError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !fs.exists(parent) => fs
            .create_dir_all(parent)
            .map_err(|source| OperationError::CreateDirFailed {
                path: parent.display().to_string(),
                source,
            }),
        _ => Ok(()),
    }
}

/// Remove whatever exists at `path`, including broken symlinks.
///
/// Does nothing if `path` does not exist. `display` is the project-relative
/// form used in the error.
///
/// # Errors
///
/// Returns [`OperationError::RemoveFailed`] if the path exists but cannot be
/// removed.
pub fn remove_existing(
    fs: &dyn FileSystemOps,
    path: &Path,
    display: &str,
) -> Result<bool, OperationError> {
    if !fs.exists(path) {
        return Ok(false);
    }
    fs.remove(path)
        .map_err(|source| OperationError::RemoveFailed {
            dest: display.to_string(),
            source,
        })?;
    Ok(true)
}

/// Path to `target` expressed relative to the directory `base`.
///
/// Both paths are expected to be absolute and free of `..` components; the
/// result walks up out of `base` with `..` until the common ancestor and
/// then down into `target`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use scaffold_files::resources::helpers::fs::relative_path;
///
/// assert_eq!(
///     relative_path(Path::new("/p/vendor/core/robots.txt"), Path::new("/p/web")),
///     PathBuf::from("../vendor/core/robots.txt")
/// );
/// ```
#[must_use]
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<Component<'_>> = target.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();
    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push(Component::ParentDir);
    }
    for component in target.iter().skip(common) {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    relative
}
