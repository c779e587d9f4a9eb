//! Source and destination paths of a scaffold file.
use std::path::{Component, Path, PathBuf};

use super::context::ScaffoldContext;
use crate::error::{ScaffoldError, ValidationError};
use crate::interpolate::Interpolator;

/// Which end of a scaffold operation a path describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A file inside the providing package.
    Source,
    /// A file inside the project.
    Destination,
}

impl PathKind {
    /// Token prefix used for interpolation (`src-rel-path`, `dest-rel-path`).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Source => "src",
            Self::Destination => "dest",
        }
    }
}

/// A path in both its display-relative and absolute forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFilePath {
    kind: PathKind,
    package: String,
    rel_path: String,
    full_path: PathBuf,
}

impl ScaffoldFilePath {
    /// Resolve a declared destination key such as `[web-root]/robots.txt`.
    ///
    /// The key is interpolated against the location tokens, normalized, and
    /// joined onto the project root.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingToken`](crate::error::ConfigError::MissingToken)
    ///   if the key names an undeclared location.
    /// - [`ValidationError::UnsafeDestination`] if it leaves the project.
    /// - [`ValidationError::EmptyDestination`] if nothing remains.
    pub fn destination(
        package: &str,
        declared: &str,
        ctx: &ScaffoldContext,
    ) -> Result<Self, ScaffoldError> {
        let rendered = ctx.interpolator().try_interpolate(declared)?;
        let rel_path = normalize_relative(&rendered).ok_or_else(|| {
            ValidationError::UnsafeDestination {
                package: package.to_string(),
                destination: declared.to_string(),
            }
        })?;
        if rel_path.is_empty() {
            return Err(ValidationError::EmptyDestination {
                package: package.to_string(),
            }
            .into());
        }
        let full_path = ctx.project_root().join(&rel_path);
        Ok(Self {
            kind: PathKind::Destination,
            package: package.to_string(),
            rel_path,
            full_path,
        })
    }

    /// A source path declared relative to `package_root`.
    ///
    /// The declared path is normalized the same way destinations are, so
    /// `assets/./robots.txt` and `assets/robots.txt` name the same file.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsafeSource`] if the path is absolute or
    /// leaves the package through `..`, and
    /// [`ValidationError::EmptySource`] if nothing remains.
    pub fn source(
        package: &str,
        package_root: &Path,
        destination: &str,
        declared: &str,
    ) -> Result<Self, ValidationError> {
        let rel_path =
            normalize_relative(declared).ok_or_else(|| ValidationError::UnsafeSource {
                package: package.to_string(),
                destination: destination.to_string(),
                source_path: declared.to_string(),
            })?;
        if rel_path.is_empty() {
            return Err(ValidationError::EmptySource {
                package: package.to_string(),
                destination: destination.to_string(),
            });
        }
        let full_path = package_root.join(&rel_path);
        Ok(Self {
            kind: PathKind::Source,
            package: package.to_string(),
            rel_path,
            full_path,
        })
    }

    /// Whether this is a source or destination path.
    #[must_use]
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    /// Package that declared this path.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Project-relative (destination) or package-relative (source) form.
    #[must_use]
    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    /// Absolute path on disk.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Add `<prefix>-rel-path` and `<prefix>-full-path` tokens.
    pub fn add_interpolation_data(&self, interpolator: &mut Interpolator) {
        let prefix = self.kind.prefix();
        interpolator.set(format!("{prefix}-rel-path"), self.rel_path.as_str());
        interpolator.set(
            format!("{prefix}-full-path"),
            self.full_path.display().to_string(),
        );
    }
}

/// Normalize a relative path to `/`-separated components.
///
/// `.` components are dropped; `None` is returned for absolute paths and
/// paths containing `..`.  An input of only `.` yields an empty string.
pub(crate) fn normalize_relative(path: &str) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::scaffold::context::Locations;

    fn ctx() -> ScaffoldContext {
        let locations = Locations::new([("web-root", "web")]).unwrap();
        ScaffoldContext::new("/project", locations)
    }

    #[test]
    fn destination_interpolates_location_tokens() {
        let path = ScaffoldFilePath::destination("acme/core", "[web-root]/robots.txt", &ctx())
            .unwrap();
        assert_eq!(path.rel_path(), "web/robots.txt");
        assert_eq!(path.full_path(), Path::new("/project/web/robots.txt"));
        assert_eq!(path.kind(), PathKind::Destination);
        assert_eq!(path.package(), "acme/core");
    }

    #[test]
    fn destination_project_root_token_collapses() {
        let path =
            ScaffoldFilePath::destination("acme/core", "[project-root]/.editorconfig", &ctx())
                .unwrap();
        assert_eq!(path.rel_path(), ".editorconfig");
    }

    #[test]
    fn destination_unknown_token_is_config_error() {
        let err = ScaffoldFilePath::destination("acme/core", "[app-root]/x", &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Config(ConfigError::MissingToken { ref token, .. }) if token == "app-root"
        ));
    }

    #[test]
    fn destination_rejects_parent_components() {
        let err = ScaffoldFilePath::destination("acme/core", "../outside.txt", &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Validation(ValidationError::UnsafeDestination { .. })
        ));
    }

    #[test]
    fn destination_rejects_absolute_paths() {
        let err = ScaffoldFilePath::destination("acme/core", "/etc/passwd", &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Validation(ValidationError::UnsafeDestination { .. })
        ));
    }

    #[test]
    fn destination_rejects_paths_that_normalize_to_nothing() {
        let err = ScaffoldFilePath::destination("acme/core", "[project-root]", &ctx()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Validation(ValidationError::EmptyDestination { .. })
        ));
    }

    #[test]
    fn source_joins_package_root() {
        let path = ScaffoldFilePath::source(
            "acme/core",
            Path::new("/project/vendor/acme/core"),
            "robots.txt",
            "./assets/robots.txt",
        )
        .unwrap();
        assert_eq!(path.rel_path(), "assets/robots.txt");
        assert_eq!(
            path.full_path(),
            Path::new("/project/vendor/acme/core/assets/robots.txt")
        );
    }

    #[test]
    fn source_rejects_parent_components() {
        let err = ScaffoldFilePath::source(
            "acme/site",
            Path::new("/project"),
            "robots.txt",
            "assets/../robots.txt",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsafeSource { ref source_path, .. } if source_path == "assets/../robots.txt"
        ));
    }

    #[test]
    fn source_rejects_absolute_paths() {
        let err = ScaffoldFilePath::source(
            "acme/core",
            Path::new("/project/vendor/acme/core"),
            "leak.txt",
            "/etc/passwd",
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::UnsafeSource { .. }));
    }

    #[test]
    fn source_that_normalizes_to_nothing_is_empty() {
        let err = ScaffoldFilePath::source("acme/core", Path::new("/pkg"), "x", "./")
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptySource { .. }));
    }

    #[test]
    fn interpolation_data_uses_kind_prefix() {
        let mut interpolator = Interpolator::new();
        ScaffoldFilePath::source("acme/core", Path::new("/pkg"), "a.txt", "a.txt")
            .unwrap()
            .add_interpolation_data(&mut interpolator);
        assert_eq!(interpolator.get("src-rel-path"), Some("a.txt"));
        assert!(interpolator.get("dest-rel-path").is_none());
    }

    #[test]
    fn normalize_relative_drops_current_dir() {
        assert_eq!(normalize_relative("./web/./a.txt").as_deref(), Some("web/a.txt"));
        assert_eq!(normalize_relative(".").as_deref(), Some(""));
        assert!(normalize_relative("web/../a").is_none());
    }
}
