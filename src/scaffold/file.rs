//! One resolved destination and the operation that materializes it.
use super::path::ScaffoldFilePath;
use crate::error::OperationError;
use crate::interpolate::Interpolator;
use crate::operations::FileSystemOps;
use crate::resources::{Applicable, Applied, OVERRIDDEN_TEMPLATE, Operation};

/// A declared destination, its operation, and the package it superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    operation: Operation,
    overrides: Option<String>,
}

impl ScaffoldFile {
    /// Wrap `operation`; `overrides` names the package that held the
    /// destination immediately before this declaration.
    #[must_use]
    pub const fn new(operation: Operation, overrides: Option<String>) -> Self {
        Self {
            operation,
            overrides,
        }
    }

    /// Operation to run if this declaration is live.
    #[must_use]
    pub const fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Destination path.
    #[must_use]
    pub const fn destination(&self) -> &ScaffoldFilePath {
        self.operation.destination()
    }

    /// Package that declared this file.
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.destination().package()
    }

    /// Package this declaration took the destination from, if any.
    #[must_use]
    pub fn overrides(&self) -> Option<&str> {
        self.overrides.as_deref()
    }

    pub(crate) fn take_overrides(&mut self) -> Option<String> {
        self.overrides.take()
    }

    /// Tokens for this file's status lines.
    #[must_use]
    pub fn interpolator(&self) -> Interpolator {
        self.operation.interpolator()
    }

    /// Status line reported when `winner` holds the destination instead.
    #[must_use]
    pub fn overridden_line(&self, winner: &str) -> String {
        self.interpolator()
            .with("overridden-by", winner)
            .interpolate(OVERRIDDEN_TEMPLATE)
    }
}

impl Applicable for ScaffoldFile {
    fn describe(&self) -> String {
        self.operation.describe()
    }

    fn apply(&self, fs: &dyn FileSystemOps) -> Result<Applied, OperationError> {
        self.operation.apply(fs)
    }

    fn preview(&self, fs: &dyn FileSystemOps) -> Applied {
        self.operation.preview(fs)
    }
}
