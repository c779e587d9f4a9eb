//! Removal of a destination.
use super::helpers::fs::remove_existing;
use super::{Applicable, Applied, REMOVE_TEMPLATE, ResourceChange, interpolator_for};
use crate::error::OperationError;
use crate::operations::FileSystemOps;
use crate::scaffold::path::ScaffoldFilePath;

/// Delete whatever exists at the destination.
///
/// An absent destination is not an error; the status line is the same
/// either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOp {
    /// Destination to delete.
    pub destination: ScaffoldFilePath,
}

impl RemoveOp {
    /// Create a remove operation.
    #[must_use]
    pub const fn new(destination: ScaffoldFilePath) -> Self {
        Self { destination }
    }
}

impl Applicable for RemoveOp {
    fn describe(&self) -> String {
        interpolator_for(&self.destination, None).interpolate(REMOVE_TEMPLATE)
    }

    fn apply(&self, fs: &dyn FileSystemOps) -> Result<Applied, OperationError> {
        let removed = remove_existing(
            fs,
            self.destination.full_path(),
            self.destination.rel_path(),
        )?;
        let change = if removed {
            ResourceChange::Applied
        } else {
            ResourceChange::AlreadyCorrect
        };
        Ok(Applied::new(change, self.describe()))
    }

    fn preview(&self, fs: &dyn FileSystemOps) -> Applied {
        let change = if fs.exists(self.destination.full_path()) {
            ResourceChange::Applied
        } else {
            ResourceChange::AlreadyCorrect
        };
        Applied::new(change, self.describe())
    }
}
