use std::path::{Path, PathBuf};

pub struct PathResolver;

impl PathResolver {
    /// `@hey-cli/utils` -> `@hey-cli_utils`
    #[must_use]
    pub fn sanitize_package_name(package_name: &str) -> String {
        package_name.replace('/', "_")
    }

    /// Store layout: `{store_dir}/_{sanitized}@{version}@{name}`, e.g.
    /// `_@hey-cli_utils@0.0.2-alpha.0@@hey-cli/utils`.
    #[must_use]
    pub fn cache_file_path(store_dir: &Path, package_name: &str, version: &str) -> PathBuf {
        let safe_package_name = Self::sanitize_package_name(package_name);
        store_dir.join(format!("_{safe_package_name}@{version}@{package_name}"))
    }
}

#[must_use]
pub fn cache_file_path(store_dir: &Path, package_name: &str, version: &str) -> PathBuf {
    PathResolver::cache_file_path(store_dir, package_name, version)
}
