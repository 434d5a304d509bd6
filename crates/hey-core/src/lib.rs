pub mod config;
pub mod init;
pub mod installer;
pub mod package;
pub mod update;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use init::{InitManager, InitOptions, init, is_dir_empty};
pub use installer::{InstallRequest, InstallTarget, PackageInstaller, TarballInstaller};
pub use package::{Package, PackageOptions, PackageSpec, ResolvedPackage};
pub use update::{check_for_update, check_package_update};

pub use hey_error::{HeyError, Result};
pub use hey_registry::{HttpRegistry, RegistrySource};
pub use hey_resolver::VersionSpec;

