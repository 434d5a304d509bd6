use std::path::{Path, PathBuf};
use std::time::Duration;

use hey_constants::{CLI_HOME_DIR, CONNECT_TIMEOUT_SECS, NPM_REGISTRY, REQUEST_TIMEOUT_SECS};
use hey_error::{HeyError, Result};
use hey_registry::HttpRegistry;

/// Runtime configuration, built once by the CLI and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub home_dir: PathBuf,
    pub cli_home: PathBuf,
    pub registry_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub debug: bool,
}

impl Config {
    #[must_use]
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        let home_dir = home_dir.into();
        Self {
            cli_home: home_dir.join(CLI_HOME_DIR),
            home_dir,
            registry_url: NPM_REGISTRY.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            debug: false,
        }
    }

    #[must_use]
    pub fn with_cli_home(mut self, cli_home: impl Into<PathBuf>) -> Self {
        self.cli_home = cli_home.into();
        self
    }

    #[must_use]
    pub fn with_registry_url(mut self, registry_url: impl Into<String>) -> Self {
        self.registry_url = registry_url.into();
        self
    }

    #[must_use]
    pub const fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Where cached templates are installed (the installer's `root`).
    #[must_use]
    pub fn template_target_dir(&self) -> PathBuf {
        self.cli_home.join("template")
    }

    #[must_use]
    pub fn template_store_dir(&self) -> PathBuf {
        self.template_target_dir().join("node_modules")
    }

    pub fn check_home_dir(&self) -> Result<&Path> {
        if self.home_dir.as_os_str().is_empty() || !self.home_dir.is_dir() {
            return Err(HeyError::invalid_argument(format!(
                "user home directory does not exist: {}",
                self.home_dir.display()
            )));
        }
        Ok(&self.home_dir)
    }

    pub fn registry(&self) -> Result<HttpRegistry> {
        HttpRegistry::new(&self.registry_url, self.timeout, self.connect_timeout)
    }
}
