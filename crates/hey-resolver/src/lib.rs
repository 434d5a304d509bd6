pub mod version_spec;

pub use version_spec::{VersionSpec, resolve_spec};

use semver::Version;
use std::cmp::Ordering;

use hey_error::{HeyError, Result};
use hey_registry::{RegistrySource, list_versions};

/// Highest version in `versions` that is strictly greater than `base_version`,
/// compared by semver precedence (build metadata does not count). Entries that
/// are not valid semver are ignored.
pub fn resolve_latest_greater_than<S: AsRef<str>>(
    base_version: &str,
    versions: &[S],
) -> Result<Option<String>> {
    let base = Version::parse(base_version.trim()).map_err(|e| {
        HeyError::invalid_argument(format!("invalid base version '{base_version}': {e}"))
    })?;

    let mut candidates: Vec<(Version, &str)> = versions
        .iter()
        .map(|v| v.as_ref())
        .filter_map(|v_str| Version::parse(v_str).ok().map(|v| (v, v_str)))
        .filter(|(v, _)| v.cmp_precedence(&base) == Ordering::Greater)
        .collect();

    // Highest first. Equal precedence keeps registry order.
    candidates.sort_by(|a, b| b.0.cmp_precedence(&a.0));

    Ok(candidates.first().map(|(_, v_str)| (*v_str).to_string()))
}

/// Newest published version of `name` above `base_version`, if any. Used by the
/// self-update check.
pub async fn resolve_npm_latest_semver_version<R: RegistrySource + ?Sized>(
    source: &R,
    name: &str,
    base_version: &str,
) -> Result<Option<String>> {
    let versions = list_versions(source, name).await?;
    resolve_latest_greater_than(base_version, &versions)
}
