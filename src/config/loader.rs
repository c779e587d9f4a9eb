//! Manifest file parsing by extension.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Deserialize a `.toml` or `.json` document.
///
/// # Errors
///
/// - [`ConfigError::Io`] if the file cannot be read.
/// - [`ConfigError::InvalidSyntax`] if it does not parse into `T`.
/// - [`ConfigError::UnsupportedFormat`] for any other extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<T, String> = match extension.as_deref() {
        Some("toml") => |s| toml::from_str(s).map_err(|e| e.message().to_string()),
        Some("json") => |s| serde_json::from_str(s).map_err(|e| e.to_string()),
        _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse(&content).map_err(|message| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message,
    })
}
