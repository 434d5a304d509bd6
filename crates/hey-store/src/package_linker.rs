use std::{
    fs, io,
    path::{Path, PathBuf},
};

use hey_utils::get_scoped_package_path;

pub struct PackageLinker;

impl PackageLinker {
    /// Expose a stored package as `node_modules/<name>` under `project_node_modules`.
    /// Falls back to copying where symlinks are unavailable.
    pub fn link_package(
        project_node_modules: &Path,
        package_name: &str,
        store_path: &Path,
    ) -> io::Result<PathBuf> {
        let dest = get_scoped_package_path(project_node_modules, package_name);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::remove_existing_package(&dest)?;

        let source = store_path.canonicalize()?;
        if Self::create_symlink(&source, &dest).is_err() {
            fs::create_dir_all(&dest)?;
            fs_extra::dir::copy(
                &source,
                &dest,
                &fs_extra::dir::CopyOptions::new()
                    .overwrite(true)
                    .content_only(true),
            )
            .map_err(io::Error::other)?;
        }
        Ok(dest)
    }

    fn remove_existing_package(dest: &Path) -> io::Result<()> {
        // symlink_metadata so dangling links are replaced too
        match fs::symlink_metadata(dest) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest),
            Ok(_) => fs::remove_file(dest),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn create_symlink(source: &Path, dest: &Path) -> io::Result<()> {
        #[cfg(target_family = "unix")]
        std::os::unix::fs::symlink(source, dest)?;

        #[cfg(target_family = "windows")]
        std::os::windows::fs::symlink_dir(source, dest)?;

        Ok(())
    }
}

pub fn link_package(
    project_node_modules: &Path,
    package_name: &str,
    store_path: &Path,
) -> io::Result<PathBuf> {
    PackageLinker::link_package(project_node_modules, package_name, store_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_scoped_package() {
        let tmp = tempfile::tempdir().unwrap();
        let store = tmp.path().join("store").join("_@hey-cli_utils@1.0.0@@hey-cli/utils");
        fs::create_dir_all(&store).unwrap();
        fs::write(store.join("package.json"), "{}").unwrap();

        let node_modules = tmp.path().join("node_modules");
        let linked = link_package(&node_modules, "@hey-cli/utils", &store).unwrap();

        assert_eq!(linked, node_modules.join("@hey-cli").join("utils"));
        assert!(linked.join("package.json").is_file());
    }

    #[test]
    fn test_relink_replaces_previous() {
        let tmp = tempfile::tempdir().unwrap();
        let old = tmp.path().join("old");
        let new = tmp.path().join("new");
        fs::create_dir_all(&old).unwrap();
        fs::create_dir_all(&new).unwrap();
        fs::write(new.join("marker"), "new").unwrap();

        let node_modules = tmp.path().join("node_modules");
        link_package(&node_modules, "demo", &old).unwrap();
        let linked = link_package(&node_modules, "demo", &new).unwrap();

        assert!(linked.join("marker").is_file());
    }
}
