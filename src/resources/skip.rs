//! Disabled destination.
use super::{Applicable, Applied, ResourceChange, SKIP_TEMPLATE, interpolator_for};
use crate::error::OperationError;
use crate::operations::FileSystemOps;
use crate::scaffold::path::ScaffoldFilePath;

/// A destination the winning package explicitly disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipOp {
    /// Destination left untouched.
    pub destination: ScaffoldFilePath,
}

impl SkipOp {
    /// Create a skip operation.
    #[must_use]
    pub const fn new(destination: ScaffoldFilePath) -> Self {
        Self { destination }
    }
}

impl Applicable for SkipOp {
    fn describe(&self) -> String {
        interpolator_for(&self.destination, None).interpolate(SKIP_TEMPLATE)
    }

    fn apply(&self, fs: &dyn FileSystemOps) -> Result<Applied, OperationError> {
        Ok(self.preview(fs))
    }

    fn preview(&self, _fs: &dyn FileSystemOps) -> Applied {
        Applied::new(
            ResourceChange::Skipped {
                reason: "disabled".to_string(),
            },
            self.describe(),
        )
    }
}
