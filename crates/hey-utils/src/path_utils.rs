use std::path::{Component, Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the node_modules directory for a project
pub fn get_node_modules_path(project_dir: &Path) -> PathBuf {
    project_dir.join("node_modules")
}

/// Handle scoped package names in file paths
pub fn get_scoped_package_path(base_path: &Path, package_name: &str) -> PathBuf {
    match package_name.split_once('/') {
        Some((scope, name)) if scope.starts_with('@') => base_path.join(scope).join(name),
        _ => base_path.join(package_name),
    }
}

/// Render a path with `/` separators regardless of the host platform.
pub fn format_path(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered.into_owned()
    } else {
        rendered.replace('\\', "/")
    }
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
