use semver::Version;
use std::path::{Path, PathBuf};

use hey_error::{HeyError, Result};
use hey_project::{find_package_dir, read_package_json};
use hey_registry::RegistrySource;
use hey_resolver::{VersionSpec, resolve_spec};
use hey_store::cache_file_path;
use hey_utils::{format_path, get_node_modules_path, get_scoped_package_path, normalize_path};

use crate::installer::{InstallRequest, InstallTarget, PackageInstaller};

/// Constructor input for [`Package`].
#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
    /// Directory the package is installed into.
    pub target_path: PathBuf,
    /// Cache directory. `Some` switches the package into cache mode.
    pub store_dir: Option<PathBuf>,
    pub package_name: String,
    /// `latest`, a dist-tag, or an exact version.
    pub package_version: String,
}

/// What the caller asked for, before anything was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub version: VersionSpec,
    pub target_path: PathBuf,
    pub store_dir: Option<PathBuf>,
}

impl PackageSpec {
    pub fn from_options(options: PackageOptions) -> Result<Self> {
        let name = options.package_name.trim().to_string();
        if name.is_empty() {
            return Err(HeyError::invalid_argument("package name must not be empty"));
        }
        if options.target_path.as_os_str().is_empty() {
            return Err(HeyError::invalid_argument(format!(
                "target path for {name} must not be empty"
            )));
        }
        if options.package_version.trim().is_empty() {
            return Err(HeyError::invalid_argument(format!(
                "version for {name} must not be empty"
            )));
        }
        if matches!(&options.store_dir, Some(dir) if dir.as_os_str().is_empty()) {
            return Err(HeyError::invalid_argument(format!(
                "store directory for {name} must not be empty"
            )));
        }

        Ok(Self {
            version: VersionSpec::parse(&options.package_version)?,
            name,
            target_path: options.target_path,
            store_dir: options.store_dir,
        })
    }

    /// Pin this spec to a concrete version. Exact versions never touch the registry.
    pub async fn resolve<R: RegistrySource + ?Sized>(&self, source: &R) -> Result<ResolvedPackage> {
        let version = match &self.version {
            VersionSpec::Exact(version) => version.clone(),
            spec => {
                let entry = source.fetch_entry(&self.name).await?;
                resolve_spec(&entry, spec)?
            }
        };

        Ok(ResolvedPackage {
            name: self.name.clone(),
            version,
            target_path: self.target_path.clone(),
            store_dir: self.store_dir.clone(),
        })
    }
}

/// A package pinned to one concrete version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub name: String,
    pub version: Version,
    pub target_path: PathBuf,
    pub store_dir: Option<PathBuf>,
}

impl ResolvedPackage {
    /// Cache location for this exact version, only in cache mode.
    #[must_use]
    pub fn cache_file_path(&self) -> Option<PathBuf> {
        self.store_dir
            .as_deref()
            .map(|store| cache_file_path(store, &self.name, &self.version.to_string()))
    }

    #[must_use]
    pub fn install_target(&self) -> InstallTarget {
        InstallTarget {
            name: self.name.clone(),
            version: self.version.to_string(),
        }
    }
}

/// A single template package: resolves its version once, checks whether it is
/// already on disk, and hands installation to a [`PackageInstaller`].
///
/// The version is resolved lazily. The first call to [`Package::prepare`] moves
/// the package from unresolved to resolved and later calls reuse that result.
#[derive(Debug, Clone)]
pub struct Package {
    spec: PackageSpec,
    resolved: Option<ResolvedPackage>,
    debug: bool,
}

impl Package {
    pub fn new(options: PackageOptions) -> Result<Self> {
        Ok(Self {
            spec: PackageSpec::from_options(options)?,
            resolved: None,
            debug: false,
        })
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn spec(&self) -> &PackageSpec {
        &self.spec
    }

    #[must_use]
    pub const fn resolved(&self) -> Option<&ResolvedPackage> {
        self.resolved.as_ref()
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    #[must_use]
    pub const fn is_cache_mode(&self) -> bool {
        self.spec.store_dir.is_some()
    }

    pub async fn prepare<R: RegistrySource + ?Sized>(
        &mut self,
        source: &R,
    ) -> Result<&ResolvedPackage> {
        if let Some(ref resolved) = self.resolved {
            return Ok(resolved);
        }

        hey_logger::debug(
            &format!(
                "Resolving {}@{} into {}",
                self.spec.name,
                self.spec.version,
                self.spec.target_path.display()
            ),
            self.debug,
        );

        let resolved = self.spec.resolve(source).await?;

        hey_logger::debug(
            &format!("Resolved {}@{}", resolved.name, resolved.version),
            self.debug,
        );

        Ok(self.resolved.insert(resolved))
    }

    /// Cache location of the resolved version. `None` before [`Package::prepare`]
    /// or outside cache mode.
    #[must_use]
    pub fn cache_file_path(&self) -> Option<PathBuf> {
        self.resolved.as_ref().and_then(ResolvedPackage::cache_file_path)
    }

    /// Directory the package content lives in once installed. In cache mode this
    /// is the cache path, which needs [`Package::prepare`] to have run.
    pub fn package_dir(&self) -> Result<PathBuf> {
        if !self.is_cache_mode() {
            return Ok(self.spec.target_path.clone());
        }
        self.cache_file_path().ok_or_else(|| {
            HeyError::invalid_argument(format!(
                "{}@{} has not been resolved yet",
                self.spec.name, self.spec.version
            ))
        })
    }

    /// In cache mode, resolves the version and checks the cache path. Otherwise
    /// checks the target path without contacting the registry.
    pub async fn exists<R: RegistrySource + ?Sized>(&mut self, source: &R) -> Result<bool> {
        let path = if self.is_cache_mode() {
            let cache_path = self.prepare(source).await?.cache_file_path();
            match cache_path {
                Some(path) => path,
                None => return Ok(false),
            }
        } else {
            self.spec.target_path.clone()
        };

        hey_logger::debug(&format!("Checking {}", path.display()), self.debug);
        Ok(tokio::fs::try_exists(&path).await?)
    }

    pub async fn install<R, I>(&mut self, source: &R, installer: &I) -> Result<()>
    where
        R: RegistrySource + ?Sized,
        I: PackageInstaller + ?Sized,
    {
        let request = InstallRequest {
            root: self.spec.target_path.clone(),
            store_dir: self.spec.store_dir.clone(),
            registry_url: source.base_url().to_string(),
            pkgs: vec![self.prepare(source).await?.install_target()],
        };

        installer.install(&request).await.map_err(|e| match e {
            HeyError::InstallError { .. } => e,
            other => HeyError::install(&request.describe(), other),
        })
    }

    /// Re-resolve the requested version and install it when that version is not
    /// on disk yet. Returns whether an install happened.
    pub async fn update<R, I>(&mut self, source: &R, installer: &I) -> Result<bool>
    where
        R: RegistrySource + ?Sized,
        I: PackageInstaller + ?Sized,
    {
        let fresh = self.spec.resolve(source).await?;
        let up_to_date = match fresh.cache_file_path() {
            Some(path) => tokio::fs::try_exists(&path).await?,
            None => self.installed_version() == Some(fresh.version.clone()),
        };
        self.resolved = Some(fresh);

        if up_to_date {
            return Ok(false);
        }
        self.install(source, installer).await?;
        Ok(true)
    }

    /// Version recorded in `node_modules/<name>/package.json` under the target path.
    fn installed_version(&self) -> Option<Version> {
        let dir = get_scoped_package_path(
            &get_node_modules_path(&self.spec.target_path),
            &self.spec.name,
        );
        read_package_json(&dir)
            .ok()
            .and_then(|pkg| pkg.version)
            .and_then(|v| Version::parse(&v).ok())
    }

    /// Entry file declared by `main` in the nearest `package.json` at or above the
    /// package directory, rendered with `/` separators. `None` when the package
    /// directory does not exist.
    pub fn root_file_path(&self) -> Result<Option<String>> {
        let start = self.package_dir()?;
        if !start.exists() {
            hey_logger::debug(&format!("{} is not installed", start.display()), self.debug);
            return Ok(None);
        }
        let Some(dir) = find_package_dir(&start) else {
            hey_logger::debug(
                &format!("No package.json found from {}", start.display()),
                self.debug,
            );
            return Ok(None);
        };

        hey_logger::debug(&format!("Package directory {}", dir.display()), self.debug);

        let manifest =
            read_package_json(&dir).map_err(|e| HeyError::ManifestError(e.to_string()))?;
        Ok(manifest
            .entry_file()
            .map(|main| format_path(&normalize_path(&dir.join(Path::new(main))))))
    }
}
