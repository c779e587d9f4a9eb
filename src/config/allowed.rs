//! Allowed-package expansion.
use std::collections::{BTreeMap, BTreeSet};

use super::manifest::PackageSection;
use crate::error::ConfigError;

/// Expand `project`'s allow-list into a priority-ordered list of package
/// identifiers, lowest priority first.
///
/// Traversal is depth-first pre-order: each package is followed by the
/// packages its own allow-list names. A repeated identifier is treated as
/// already resolved, so cycles terminate. The project itself never appears
/// in the result; callers append it last.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPackage`] if an allow-list names a package
/// that `packages` does not contain.
pub fn expand_allowed(
    project: &str,
    allowed: &[String],
    packages: &BTreeMap<String, PackageSection>,
) -> Result<Vec<String>, ConfigError> {
    let mut visited: BTreeSet<&str> = BTreeSet::from([project]);
    let mut order = Vec::new();
    let mut worklist: Vec<(&str, &str)> = allowed
        .iter()
        .rev()
        .map(|name| (name.as_str(), project))
        .collect();

    while let Some((name, required_by)) = worklist.pop() {
        if !visited.insert(name) {
            tracing::debug!("{name} already allowed, skipping repeat from {required_by}");
            continue;
        }
        let (key, section) =
            packages
                .get_key_value(name)
                .ok_or_else(|| ConfigError::UnknownPackage {
                    name: name.to_string(),
                    required_by: required_by.to_string(),
                })?;
        order.push(key.clone());
        worklist.extend(
            section
                .allowed_packages
                .iter()
                .rev()
                .map(|child| (child.as_str(), key.as_str())),
        );
    }

    Ok(order)
}
