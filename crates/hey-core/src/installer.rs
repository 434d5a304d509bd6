use futures::future::BoxFuture;
use std::path::PathBuf;
use std::time::Duration;

use hey_error::{HeyError, Result};
use hey_registry::{HttpRegistry, RegistrySource};
use hey_store::{cache_file_path, link_package, unpack_tarball, verify_integrity};
use hey_utils::{get_node_modules_path, get_scoped_package_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub name: String,
    pub version: String,
}

/// Everything an installer needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub root: PathBuf,
    pub store_dir: Option<PathBuf>,
    pub registry_url: String,
    pub pkgs: Vec<InstallTarget>,
}

impl InstallRequest {
    #[must_use]
    pub fn describe(&self) -> String {
        self.pkgs
            .iter()
            .map(|pkg| format!("{}@{}", pkg.name, pkg.version))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Fetches and unpacks the packages named in an [`InstallRequest`].
pub trait PackageInstaller: Send + Sync {
    fn install<'a>(&'a self, request: &'a InstallRequest) -> BoxFuture<'a, Result<()>>;
}

/// Default installer: downloads each tarball from the request's registry, checks
/// its integrity, unpacks it and links it into `{root}/node_modules`.
#[derive(Debug, Clone)]
pub struct TarballInstaller {
    timeout: Duration,
    connect_timeout: Duration,
    debug: bool,
}

impl TarballInstaller {
    #[must_use]
    pub const fn new(timeout: Duration, connect_timeout: Duration, debug: bool) -> Self {
        Self {
            timeout,
            connect_timeout,
            debug,
        }
    }

    async fn install_one(
        &self,
        registry: &HttpRegistry,
        request: &InstallRequest,
        target: &InstallTarget,
    ) -> Result<PathBuf> {
        let label = format!("{}@{}", target.name, target.version);
        let entry = registry.fetch_entry(&target.name).await?;
        let dist = entry.version_dist(&target.version)?;

        if !self.debug {
            hey_logger::status(&format!("Downloading {label}..."));
        }
        let bytes = registry.download(&dist.tarball).await?;
        hey_logger::debug(
            &format!("Downloaded {label} ({} bytes)", bytes.len()),
            self.debug,
        );

        match dist.integrity.as_deref() {
            Some(sri) if !verify_integrity(&bytes, sri) => {
                return Err(HeyError::install(&label, "integrity check failed"));
            }
            Some(_) => hey_logger::debug(&format!("Integrity verified for {label}"), self.debug),
            None => hey_logger::debug(&format!("No integrity recorded for {label}"), self.debug),
        }

        let node_modules = get_node_modules_path(&request.root);
        let unpack_dir = match &request.store_dir {
            Some(store_dir) => cache_file_path(store_dir, &target.name, &target.version),
            None => get_scoped_package_path(&node_modules, &target.name),
        };

        let dest = unpack_dir.clone();
        let unpacked = tokio::task::spawn_blocking(move || unpack_tarball(&dest, &bytes))
            .await
            .map_err(|e| HeyError::install(&label, e))?
            .map_err(|e| HeyError::install(&label, format!("unpack failed: {e}")))?;

        if request.store_dir.is_some() {
            link_package(&node_modules, &target.name, &unpacked)
                .map_err(|e| HeyError::install(&label, format!("link failed: {e}")))?;
        }

        hey_logger::debug(
            &format!("Installed {label} at {}", unpacked.display()),
            self.debug,
        );
        Ok(unpacked)
    }
}

impl PackageInstaller for TarballInstaller {
    fn install<'a>(&'a self, request: &'a InstallRequest) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let registry =
                HttpRegistry::new(&request.registry_url, self.timeout, self.connect_timeout)?;

            for target in &request.pkgs {
                self.install_one(&registry, request, target)
                    .await
                    .map_err(|e| match e {
                        HeyError::InstallError { .. } => e,
                        other => {
                            HeyError::install(&format!("{}@{}", target.name, target.version), other)
                        }
                    })?;
            }
            Ok(())
        })
    }
}
