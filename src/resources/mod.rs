//! Idempotent scaffold operations (describe + apply pattern).
//!
//! Each operation owns the paths it acts on and renders its own status line
//! through an [`Interpolator`] loaded with `dest-rel-path`, `src-rel-path`
//! and `package-name`.
pub mod helpers;
pub mod remove;
pub mod replace;
pub mod skip;

use crate::error::OperationError;
use crate::interpolate::Interpolator;
use crate::operations::FileSystemOps;
use crate::scaffold::path::ScaffoldFilePath;

pub use remove::RemoveOp;
pub use replace::ReplaceOp;
pub use skip::SkipOp;

/// Status line for a copied file.
pub const COPY_TEMPLATE: &str = "  - Copy [dest-rel-path] from [src-rel-path]";
/// Status line for a symlinked file.
pub const LINK_TEMPLATE: &str = "  - Link [dest-rel-path] from [src-rel-path]";
/// Status line for a disabled destination.
pub const SKIP_TEMPLATE: &str = "  - Skip [dest-rel-path]: disabled";
/// Status line when overwriting is refused.
pub const EXISTS_TEMPLATE: &str = "  - Skip scaffold file [dest-rel-path] because it already exists.";
/// Status line for a removed destination.
pub const REMOVE_TEMPLATE: &str = "  - Remove [dest-rel-path]";
/// Status line for a declaration that lost to a later package.
pub const OVERRIDDEN_TEMPLATE: &str = "  - [dest-rel-path] overridden in [overridden-by]";

/// Interface shared by every scaffold operation.
pub trait Applicable {
    /// The status line this operation would print, without touching disk.
    fn describe(&self) -> String;

    /// Perform the operation.
    ///
    /// # Errors
    ///
    /// Returns an [`OperationError`] if a filesystem call fails or the
    /// source file does not exist.
    fn apply(&self, fs: &dyn FileSystemOps) -> Result<Applied, OperationError>;

    /// What [`apply`](Self::apply) would report, using only read-only
    /// filesystem checks. Used for dry runs.
    fn preview(&self, fs: &dyn FileSystemOps) -> Applied;
}

/// Outcome of [`Applicable::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// What happened on disk.
    pub change: ResourceChange,
    /// Rendered status line.
    pub status: String,
}

impl Applied {
    /// Pair a change with its rendered status line.
    #[must_use]
    pub const fn new(change: ResourceChange, status: String) -> Self {
        Self { change, status }
    }
}

/// Result of applying an operation.
///
/// # Examples
///
/// ```
/// use scaffold_files::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "disabled".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// assert_ne!(noop, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The destination was created, replaced or deleted.
    Applied,
    /// Nothing needed to change (e.g. removing an absent file).
    AlreadyCorrect,
    /// The operation deliberately did nothing.
    Skipped {
        /// Why nothing was done.
        reason: String,
    },
}

/// The file-level action resolved for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Leave the destination untouched.
    Skip(SkipOp),
    /// Copy or link a package file over the destination.
    Replace(ReplaceOp),
    /// Delete the destination.
    Remove(RemoveOp),
}

impl Operation {
    /// Destination this operation acts on.
    #[must_use]
    pub const fn destination(&self) -> &ScaffoldFilePath {
        match self {
            Self::Skip(op) => &op.destination,
            Self::Replace(op) => &op.destination,
            Self::Remove(op) => &op.destination,
        }
    }

    /// Source file, for copy and link operations.
    #[must_use]
    pub const fn source(&self) -> Option<&ScaffoldFilePath> {
        match self {
            Self::Replace(op) => Some(&op.source),
            Self::Skip(_) | Self::Remove(_) => None,
        }
    }

    /// Short verb used in listings.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Skip(_) => "skip",
            Self::Replace(op) if op.symlink => "link",
            Self::Replace(_) => "copy",
            Self::Remove(_) => "remove",
        }
    }

    /// Tokens available to status lines: `package-name` plus the
    /// destination and (for replace) source path tokens.
    #[must_use]
    pub fn interpolator(&self) -> Interpolator {
        interpolator_for(self.destination(), self.source())
    }
}

impl Applicable for Operation {
    fn describe(&self) -> String {
        match self {
            Self::Skip(op) => op.describe(),
            Self::Replace(op) => op.describe(),
            Self::Remove(op) => op.describe(),
        }
    }

    fn apply(&self, fs: &dyn FileSystemOps) -> Result<Applied, OperationError> {
        match self {
            Self::Skip(op) => op.apply(fs),
            Self::Replace(op) => op.apply(fs),
            Self::Remove(op) => op.apply(fs),
        }
    }

    fn preview(&self, fs: &dyn FileSystemOps) -> Applied {
        match self {
            Self::Skip(op) => op.preview(fs),
            Self::Replace(op) => op.preview(fs),
            Self::Remove(op) => op.preview(fs),
        }
    }
}

pub(crate) fn interpolator_for(
    destination: &ScaffoldFilePath,
    source: Option<&ScaffoldFilePath>,
) -> Interpolator {
    let mut interpolator = Interpolator::new().with("package-name", destination.package());
    destination.add_interpolation_data(&mut interpolator);
    if let Some(source) = source {
        source.add_interpolation_data(&mut interpolator);
    }
    interpolator
}
