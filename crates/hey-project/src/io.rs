use std::fs;
use std::path::{Path, PathBuf};

use hey_constants::MANIFEST_FILE;

use crate::package_json::PackageJson;

pub fn read_package_json(project_dir: &Path) -> anyhow::Result<PackageJson> {
    let path = project_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let parsed: PackageJson = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    Ok(parsed)
}

pub fn write_package_json(project_dir: &Path, package_json: &PackageJson) -> anyhow::Result<()> {
    let path = project_dir.join(MANIFEST_FILE);
    let mut content = serde_json::to_string_pretty(package_json)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// Nearest directory at or above `start` that contains a `package.json`.
#[must_use]
pub fn find_package_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .map(Path::to_path_buf)
}
