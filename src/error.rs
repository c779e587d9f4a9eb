//! Domain-specific error types for the scaffold engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ScaffoldError
//! ├── Validation(ValidationError) : malformed file-mapping declarations
//! ├── Config(ConfigError)         : manifest, locations, allow-lists
//! └── Operation(OperationError)   : copy, link, remove failures
//! ```
//!
//! Each message names only its own layer; the underlying error is exposed
//! through [`std::error::Error::source`], so `{:#}` prints every layer once.
//!
//! Validation and configuration errors are raised while resolving, before
//! anything touches the filesystem. Operation errors abort execution at the
//! first failing destination.

use thiserror::Error;

/// Top-level error type for the scaffold engine.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A package declared a file mapping that cannot be interpreted.
    #[error("Invalid file mapping")]
    Validation(#[from] ValidationError),

    /// The manifest, a location token or an allow-list is unusable.
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// A filesystem operation failed while scaffolding.
    #[error("Scaffold operation failed")]
    Operation(#[from] OperationError),
}

/// Errors raised while normalizing a package's raw file mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A mapping value was boolean `true`, which has no meaning.
    #[error("'{destination}' in package '{package}' is mapped to true; use a source path, false, or a table")]
    MeaninglessTrue {
        /// Package that declared the mapping.
        package: String,
        /// Destination key as declared.
        destination: String,
    },

    /// A mapping value was the empty string.
    #[error("'{destination}' in package '{package}' is mapped to an empty source path")]
    EmptySource {
        /// Package that declared the mapping.
        package: String,
        /// Destination key as declared.
        destination: String,
    },

    /// A structured `replace` entry did not name a source path.
    #[error("'{destination}' in package '{package}' uses mode 'replace' without a path")]
    MissingSource {
        /// Package that declared the mapping.
        package: String,
        /// Destination key as declared.
        destination: String,
    },

    /// A destination key was empty, or became empty once normalized.
    #[error("package '{package}' declares an empty destination path")]
    EmptyDestination {
        /// Package that declared the mapping.
        package: String,
    },

    /// A source path is absolute or climbs out of its package with `..`.
    #[error("source '{source_path}' for '{destination}' in package '{package}' must stay inside the package")]
    UnsafeSource {
        /// Package that declared the mapping.
        package: String,
        /// Destination key as declared.
        destination: String,
        /// Source path as declared.
        source_path: String,
    },

    /// A destination resolved outside of the project root.
    #[error("destination '{destination}' in package '{package}' must stay inside the project")]
    UnsafeDestination {
        /// Package that declared the mapping.
        package: String,
        /// Destination key as declared.
        destination: String,
    },
}

/// Errors that arise from manifest loading and run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A path template referenced a token that has no value.
    #[error("Unknown location token [{token}] in '{template}'")]
    MissingToken {
        /// Token name, without brackets.
        token: String,
        /// Template that referenced it.
        template: String,
    },

    /// A declared location is absolute or escapes the project root.
    #[error("Location '{token}' = '{path}' must be a path inside the project root")]
    InvalidLocation {
        /// Location token name.
        token: String,
        /// Declared value.
        path: String,
    },

    /// An allow-list named a package the package source does not know.
    #[error("Package '{name}' allowed by '{required_by}' is not installed")]
    UnknownPackage {
        /// Identifier that could not be resolved.
        name: String,
        /// Package whose allow-list named it.
        required_by: String,
    },

    /// The manifest could not be parsed.
    #[error("Invalid manifest syntax in {file}: {message}")]
    InvalidSyntax {
        /// Manifest path.
        file: String,
        /// Parser message.
        message: String,
    },

    /// The manifest uses an extension the loader does not understand.
    #[error("Unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading the manifest.
    #[error("IO error reading manifest {path}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised while applying a scaffold operation.
///
/// Paths are carried as their rendered, project- or package-relative
/// display forms so the message is readable without further context.
#[derive(Error, Debug)]
pub enum OperationError {
    /// Copying the source onto the destination failed.
    #[error("Could not copy source file {src} to {dest}")]
    CopyFailed {
        /// Package-relative source path.
        src: String,
        /// Project-relative destination path.
        dest: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating the relative symlink failed.
    #[error("Could not symlink source file {src} to {dest}")]
    LinkFailed {
        /// Package-relative source path.
        src: String,
        /// Project-relative destination path.
        dest: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The declared source does not exist in its package.
    #[error("Scaffold file {src} not found in package {package}")]
    SourceMissing {
        /// Package-relative source path.
        src: String,
        /// Package that declared it.
        package: String,
    },

    /// Removing an existing destination failed.
    #[error("Could not remove {dest}")]
    RemoveFailed {
        /// Project-relative destination path.
        dest: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating a directory failed.
    #[error("Could not create directory {path}")]
    CreateDirFailed {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
