use hey_constants::{PACKAGE_NAME, VERSION};
use hey_error::Result;
use hey_registry::RegistrySource;
use hey_resolver::resolve_npm_latest_semver_version;

/// Newer published release of the CLI itself, if there is one.
pub async fn check_for_update<R: RegistrySource + ?Sized>(source: &R) -> Result<Option<String>> {
    check_package_update(source, PACKAGE_NAME, VERSION).await
}

pub async fn check_package_update<R: RegistrySource + ?Sized>(
    source: &R,
    package_name: &str,
    current_version: &str,
) -> Result<Option<String>> {
    resolve_npm_latest_semver_version(source, package_name, current_version).await
}
