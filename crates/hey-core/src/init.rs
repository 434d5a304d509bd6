use std::fs;
use std::path::{Path, PathBuf};

use hey_constants::{DEFAULT_TEMPLATE, MANIFEST_FILE, TEMPLATE_SUBDIR};
use hey_error::{HeyError, Result};
use hey_project::{read_package_json, write_package_json};
use hey_registry::RegistrySource;
use hey_utils::{ensure_dir_exists, parse_pkg_spec};

use crate::config::Config;
use crate::installer::{PackageInstaller, TarballInstaller};
use crate::package::{Package, PackageOptions};

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Reuse a non-empty project directory.
    pub force: bool,
    /// Local template checkout. Skips the registry entirely.
    pub target_path: Option<PathBuf>,
    /// Template package spec, `name[@version]`.
    pub template: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            force: false,
            target_path: None,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

pub struct InitManager {
    config: Config,
}

impl InitManager {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn init_project<R, I>(
        &self,
        cwd: &Path,
        project_name: &str,
        options: &InitOptions,
        source: &R,
        installer: &I,
    ) -> Result<PathBuf>
    where
        R: RegistrySource + ?Sized,
        I: PackageInstaller + ?Sized,
    {
        let project_dir = Self::project_dir(cwd, project_name)?;
        if !options.force && !is_dir_empty(&project_dir)? {
            return Err(HeyError::invalid_argument(format!(
                "{} is not empty, pass --force to use it anyway",
                project_dir.display()
            )));
        }

        let package = self.prepare_template(options, source, installer).await?;
        let package_dir = package.package_dir()?;
        let template_dir = package_dir.join(TEMPLATE_SUBDIR);
        let source_dir = if template_dir.is_dir() {
            template_dir
        } else {
            package_dir
        };

        hey_logger::debug(
            &format!("Copying {} to {}", source_dir.display(), project_dir.display()),
            self.config.debug,
        );
        ensure_dir_exists(&project_dir)?;
        Self::copy_template(&source_dir, &project_dir, options.force)?;
        Self::rename_manifest(&project_dir, project_name);

        Ok(project_dir)
    }

    fn project_dir(cwd: &Path, project_name: &str) -> Result<PathBuf> {
        let name = project_name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(HeyError::invalid_argument(format!(
                "invalid project name '{project_name}'"
            )));
        }
        Ok(cwd.join(name))
    }

    async fn prepare_template<R, I>(
        &self,
        options: &InitOptions,
        source: &R,
        installer: &I,
    ) -> Result<Package>
    where
        R: RegistrySource + ?Sized,
        I: PackageInstaller + ?Sized,
    {
        let (name, version) = parse_pkg_spec(&options.template);

        if let Some(local) = &options.target_path {
            let mut package = Package::new(PackageOptions {
                target_path: local.clone(),
                store_dir: None,
                package_name: name,
                package_version: version,
            })?
            .with_debug(self.config.debug);

            if !package.exists(source).await? {
                return Err(HeyError::invalid_argument(format!(
                    "local template not found at {}",
                    local.display()
                )));
            }
            hey_logger::info(&format!("Using local template {}", local.display()));
            return Ok(package);
        }

        let target_path = self.config.template_target_dir();
        let store_dir = self.config.template_store_dir();
        ensure_dir_exists(&store_dir)?;

        let mut package = Package::new(PackageOptions {
            target_path,
            store_dir: Some(store_dir),
            package_name: name,
            package_version: version,
        })?
        .with_debug(self.config.debug);

        if package.exists(source).await? {
            hey_logger::info(&format!("Using cached template {}", describe(&package)));
        } else {
            hey_logger::status(&format!("Installing template {}...", describe(&package)));
            package.install(source, installer).await?;
            hey_logger::success(&format!("Installed template {}", describe(&package)));
        }

        Ok(package)
    }

    fn copy_template(source_dir: &Path, project_dir: &Path, overwrite: bool) -> Result<()> {
        let options = fs_extra::dir::CopyOptions::new().overwrite(overwrite);

        for entry in fs::read_dir(source_dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_name() == "node_modules" {
                continue;
            }

            if entry.file_type()?.is_dir() {
                fs_extra::dir::copy(&path, project_dir, &options)
                    .map_err(|e| HeyError::Io(e.to_string()))?;
            } else {
                fs::copy(&path, project_dir.join(entry.file_name()))?;
            }
        }
        Ok(())
    }

    /// Stamp the project name into the copied manifest. Templates whose manifest
    /// is not plain JSON are left as they are.
    fn rename_manifest(project_dir: &Path, project_name: &str) {
        if !project_dir.join(MANIFEST_FILE).is_file() {
            return;
        }

        let result = read_package_json(project_dir).and_then(|mut manifest| {
            manifest.name = Some(project_name.trim().to_string());
            write_package_json(project_dir, &manifest)
        });

        if let Err(e) = result {
            hey_logger::warn(&format!("Left package.json untouched: {e}"));
        }
    }
}

fn describe(package: &Package) -> String {
    match package.resolved() {
        Some(resolved) => format!("{}@{}", resolved.name, resolved.version),
        None => format!("{}@{}", package.spec().name, package.spec().version),
    }
}

/// A missing directory counts as empty.
pub fn is_dir_empty(path: &Path) -> Result<bool> {
    match fs::read_dir(path) {
        Ok(mut entries) => Ok(entries.next().is_none()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Scaffold `project_name` under the current directory using the registry and
/// installer described by `config`.
pub async fn init(project_name: &str, options: &InitOptions, config: &Config) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let registry = config.registry()?;
    let installer = TarballInstaller::new(config.timeout, config.connect_timeout, config.debug);

    InitManager::new(config.clone())
        .init_project(&cwd, project_name, options, &registry, &installer)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::InstallRequest;
    use crate::test_support::{CountingRegistry, RecordingInstaller};
    use futures::future::BoxFuture;
    use hey_store::cache_file_path;

    /// Installer that materialises a small template in the cache path.
    struct FixtureInstaller;

    impl PackageInstaller for FixtureInstaller {
        fn install<'a>(&'a self, request: &'a InstallRequest) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                let store = request
                    .store_dir
                    .as_deref()
                    .ok_or_else(|| HeyError::install("fixture", "no store dir"))?;
                for pkg in &request.pkgs {
                    let dir = cache_file_path(store, &pkg.name, &pkg.version);
                    fs::create_dir_all(dir.join(TEMPLATE_SUBDIR).join("src"))?;
                    fs::write(dir.join("package.json"), r#"{"name":"tpl"}"#)?;
                    fs::write(
                        dir.join(TEMPLATE_SUBDIR).join("package.json"),
                        r#"{"name":"placeholder","private":true}"#,
                    )?;
                    fs::write(dir.join(TEMPLATE_SUBDIR).join("src").join("main.js"), "")?;
                }
                Ok(())
            })
        }
    }

    fn write_local_template(dir: &Path) {
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::create_dir_all(dir.join("node_modules").join("dep")).unwrap();
        fs::write(
            dir.join("package.json"),
            r#"{"name":"local-template","version":"0.0.1","main":"src/index.js"}"#,
        )
        .unwrap();
        fs::write(dir.join("src").join("index.js"), "console.log('hi')").unwrap();
    }

    #[tokio::test]
    async fn test_init_from_local_template() {
        let tmp = tempfile::tempdir().unwrap();
        let local = tmp.path().join("local-template");
        write_local_template(&local);

        let cwd = tmp.path().join("work");
        fs::create_dir_all(&cwd).unwrap();

        let registry = CountingRegistry::with_latest("1.0.0");
        let installer = RecordingInstaller::default();
        let options = InitOptions {
            target_path: Some(local),
            ..InitOptions::default()
        };

        let project = InitManager::new(Config::new(tmp.path()))
            .init_project(&cwd, "my-app", &options, &registry, &installer)
            .await
            .unwrap();

        assert_eq!(project, cwd.join("my-app"));
        assert!(project.join("src").join("index.js").is_file());
        assert!(!project.join("node_modules").exists());
        let manifest = read_package_json(&project).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("my-app"));
        assert_eq!(manifest.main.as_deref(), Some("src/index.js"));

        assert_eq!(registry.calls(), 0);
        assert!(installer.requests().is_empty());
    }

    #[tokio::test]
    async fn test_init_missing_local_template() {
        let tmp = tempfile::tempdir().unwrap();
        let options = InitOptions {
            target_path: Some(tmp.path().join("missing")),
            ..InitOptions::default()
        };

        let err = InitManager::new(Config::new(tmp.path()))
            .init_project(
                tmp.path(),
                "my-app",
                &options,
                &CountingRegistry::with_latest("1.0.0"),
                &RecordingInstaller::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HeyError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_init_refuses_non_empty_dir_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let local = tmp.path().join("tpl");
        write_local_template(&local);
        let project = tmp.path().join("my-app");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("keep.txt"), "mine").unwrap();

        let manager = InitManager::new(Config::new(tmp.path()));
        let registry = CountingRegistry::with_latest("1.0.0");
        let installer = RecordingInstaller::default();
        let mut options = InitOptions {
            target_path: Some(local),
            ..InitOptions::default()
        };

        let err = manager
            .init_project(tmp.path(), "my-app", &options, &registry, &installer)
            .await
            .unwrap_err();
        assert!(matches!(err, HeyError::InvalidArgument(_)));

        options.force = true;
        manager
            .init_project(tmp.path(), "my-app", &options, &registry, &installer)
            .await
            .unwrap();
        assert!(project.join("keep.txt").is_file());
        assert!(project.join("src").join("index.js").is_file());
    }

    #[tokio::test]
    async fn test_init_installs_template_into_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::new(tmp.path());
        let registry = CountingRegistry::with_latest("1.3.0");
        let options = InitOptions {
            template: "demo-template".to_string(),
            ..InitOptions::default()
        };

        let project = InitManager::new(config.clone())
            .init_project(tmp.path(), "my-app", &options, &registry, &FixtureInstaller)
            .await
            .unwrap();

        assert!(
            config
                .template_store_dir()
                .join("_demo-template@1.3.0@demo-template")
                .is_dir()
        );
        assert!(project.join("src").join("main.js").is_file());
        let manifest = read_package_json(&project).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("my-app"));
        assert!(manifest.other.contains_key("private"));
    }

    #[tokio::test]
    async fn test_init_reuses_cached_template() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::new(tmp.path());
        let cached = config
            .template_store_dir()
            .join("_demo-template@2.0.0@demo-template");
        fs::create_dir_all(&cached).unwrap();
        fs::write(cached.join("README.md"), "# cached").unwrap();

        let registry = CountingRegistry::with_latest("2.0.0");
        let installer = RecordingInstaller::default();
        let options = InitOptions {
            template: "demo-template@latest".to_string(),
            ..InitOptions::default()
        };

        let project = InitManager::new(config)
            .init_project(tmp.path(), "my-app", &options, &registry, &installer)
            .await
            .unwrap();

        assert!(installer.requests().is_empty());
        assert_eq!(registry.calls(), 1);
        assert!(project.join("README.md").is_file());
    }

    #[tokio::test]
    async fn test_init_rejects_bad_project_names() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = InitManager::new(Config::new(tmp.path()));
        let registry = CountingRegistry::with_latest("1.0.0");
        let installer = RecordingInstaller::default();

        for name in ["", "..", "a/b"] {
            let err = manager
                .init_project(tmp.path(), name, &InitOptions::default(), &registry, &installer)
                .await
                .unwrap_err();
            assert!(matches!(err, HeyError::InvalidArgument(_)), "{name}");
        }
    }

    #[test]
    fn test_is_dir_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(is_dir_empty(tmp.path()).unwrap());
        assert!(is_dir_empty(&tmp.path().join("missing")).unwrap());
        fs::write(tmp.path().join("file"), "").unwrap();
        assert!(!is_dir_empty(tmp.path()).unwrap());
    }
}
