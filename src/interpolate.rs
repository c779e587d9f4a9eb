//! `[token]` interpolation for path templates and status messages.
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ConfigError;

/// Matches `[token-name]`; names are ASCII letters, digits, `-` and `_`.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // literal pattern
    Regex::new(r"\[([A-Za-z0-9_-]+)\]").unwrap()
});

/// Token table used to render templates such as
/// `"  - Copy [dest-rel-path] from [src-rel-path]"`.
///
/// # Examples
///
/// ```
/// use scaffold_files::interpolate::Interpolator;
///
/// let interpolator = Interpolator::new()
///     .with("dest-rel-path", "web/robots.txt")
///     .with("package-name", "acme/core");
///
/// assert_eq!(
///     interpolator.interpolate("[dest-rel-path] from [package-name]"),
///     "web/robots.txt from acme/core"
/// );
/// // Unknown tokens are left untouched.
/// assert_eq!(interpolator.interpolate("[web-root]/x"), "[web-root]/x");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpolator {
    data: BTreeMap<String, String>,
}

impl Interpolator {
    /// Create an empty interpolator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(token, value);
        self
    }

    /// Set (or replace) the value for `token`.
    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.data.insert(token.into(), value.into());
    }

    /// Value currently bound to `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.data.get(token).map(String::as_str)
    }

    /// Render `template`, leaving unknown tokens verbatim.
    #[must_use]
    pub fn interpolate(&self, template: &str) -> String {
        TOKEN
            .replace_all(template, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let name = caps.get(1).map_or("", |m| m.as_str());
                self.data
                    .get(name)
                    .map_or_else(|| whole.to_string(), Clone::clone)
            })
            .into_owned()
    }

    /// Render `template`, failing on the first token without a value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] naming the unknown token.
    pub fn try_interpolate(&self, template: &str) -> Result<String, ConfigError> {
        if let Some(missing) = find_tokens(template)
            .into_iter()
            .find(|token| !self.data.contains_key(*token))
        {
            return Err(ConfigError::MissingToken {
                token: missing.to_string(),
                template: template.to_string(),
            });
        }
        Ok(self.interpolate(template))
    }
}

/// Token names referenced by `template`, in order of appearance.
#[must_use]
pub fn find_tokens(template: &str) -> Vec<&str> {
    TOKEN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
