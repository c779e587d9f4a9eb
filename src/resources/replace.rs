//! Copy or link a package file over a destination.
use super::helpers::fs::{ensure_parent_dir, relative_path, remove_existing};
use super::{
    Applicable, Applied, COPY_TEMPLATE, EXISTS_TEMPLATE, LINK_TEMPLATE, ResourceChange,
    interpolator_for,
};
use crate::error::OperationError;
use crate::operations::FileSystemOps;
use crate::scaffold::path::ScaffoldFilePath;

/// Replace the destination with the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOp {
    /// File inside the providing package.
    pub source: ScaffoldFilePath,
    /// File inside the project.
    pub destination: ScaffoldFilePath,
    /// Create a relative symlink instead of copying.
    pub symlink: bool,
    /// Replace an existing destination. When `false` an existing file is
    /// left alone.
    pub overwrite: bool,
}

impl ReplaceOp {
    /// Create a replace operation.
    #[must_use]
    pub const fn new(
        source: ScaffoldFilePath,
        destination: ScaffoldFilePath,
        symlink: bool,
        overwrite: bool,
    ) -> Self {
        Self {
            source,
            destination,
            symlink,
            overwrite,
        }
    }

    fn keeps_existing(&self, fs: &dyn FileSystemOps) -> bool {
        !self.overwrite && fs.exists(self.destination.full_path())
    }

    fn kept(&self) -> Applied {
        Applied::new(
            ResourceChange::Skipped {
                reason: "already exists".to_string(),
            },
            self.render(EXISTS_TEMPLATE),
        )
    }

    fn render(&self, template: &str) -> String {
        interpolator_for(&self.destination, Some(&self.source)).interpolate(template)
    }

    fn place(&self, fs: &dyn FileSystemOps) -> Result<(), OperationError> {
        let dest = self.destination.full_path();
        let src = self.source.full_path();
        if self.symlink {
            let base = dest.parent().unwrap_or(dest);
            fs.symlink(&relative_path(src, base), dest)
                .map_err(|source| OperationError::LinkFailed {
                    src: self.source.rel_path().to_string(),
                    dest: self.destination.rel_path().to_string(),
                    source,
                })
        } else {
            fs.copy(src, dest)
                .map_err(|source| OperationError::CopyFailed {
                    src: self.source.rel_path().to_string(),
                    dest: self.destination.rel_path().to_string(),
                    source,
                })
        }
    }
}

impl Applicable for ReplaceOp {
    fn describe(&self) -> String {
        self.render(if self.symlink {
            LINK_TEMPLATE
        } else {
            COPY_TEMPLATE
        })
    }

    fn apply(&self, fs: &dyn FileSystemOps) -> Result<Applied, OperationError> {
        let dest = self.destination.full_path();

        if self.keeps_existing(fs) {
            return Ok(self.kept());
        }

        if !fs.exists(self.source.full_path()) {
            return Err(OperationError::SourceMissing {
                src: self.source.rel_path().to_string(),
                package: self.source.package().to_string(),
            });
        }

        // Removing the destination would delete the source.
        if self.source.full_path() == dest {
            return Ok(Applied::new(
                ResourceChange::Skipped {
                    reason: "source and destination are the same file".to_string(),
                },
                self.render("  - Skip [dest-rel-path]: source and destination are the same file"),
            ));
        }

        remove_existing(fs, dest, self.destination.rel_path())?;
        ensure_parent_dir(fs, dest)?;
        self.place(fs)?;

        Ok(Applied::new(ResourceChange::Applied, self.describe()))
    }

    fn preview(&self, fs: &dyn FileSystemOps) -> Applied {
        if self.keeps_existing(fs) {
            self.kept()
        } else {
            Applied::new(ResourceChange::Applied, self.describe())
        }
    }
}
