use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use hey_constants::{CLI_HOME_ENV, REGISTRY_ENV};
use hey_core::Config;
use hey_registry::registry_url;

use crate::commands::Cli;

/// Build the runtime configuration from flags and the process environment.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let home = dirs::home_dir().context("unable to determine the user home directory")?;
    Ok(build_config(
        &home,
        std::env::var(CLI_HOME_ENV).ok(),
        std::env::var(REGISTRY_ENV).ok(),
        cli.mirror,
        cli.debug,
    ))
}

/// `cli_home_override` is resolved against the home directory when relative.
/// An explicit registry override wins over `--mirror`.
pub fn build_config(
    home: &Path,
    cli_home_override: Option<String>,
    registry_override: Option<String>,
    mirror: bool,
    debug: bool,
) -> Config {
    let mut config = Config::new(home).with_debug(debug);

    if let Some(cli_home) = cli_home_override.filter(|v| !v.trim().is_empty()) {
        config = config.with_cli_home(home.join(PathBuf::from(cli_home.trim())));
    }

    let registry = registry_override
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| registry_url(mirror).to_string());
    config.with_registry_url(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = build_config(Path::new("/home/dev"), None, None, false, false);
        assert_eq!(config.cli_home, PathBuf::from("/home/dev/.hey-cli"));
        assert_eq!(config.registry_url, "https://registry.npmjs.org");
    }

    #[test]
    fn test_mirror_flag() {
        let config = build_config(Path::new("/home/dev"), None, None, true, true);
        assert_eq!(config.registry_url, "https://registry.npmmirror.org");
        assert!(config.debug);
    }

    #[test]
    fn test_env_overrides() {
        let config = build_config(
            Path::new("/home/dev"),
            Some(".config/hey".to_string()),
            Some("https://npm.internal.test".to_string()),
            true,
            false,
        );
        assert_eq!(config.cli_home, PathBuf::from("/home/dev/.config/hey"));
        assert_eq!(config.registry_url, "https://npm.internal.test");

        let absolute = build_config(
            Path::new("/home/dev"),
            Some("/opt/hey".to_string()),
            Some("  ".to_string()),
            false,
            false,
        );
        assert_eq!(absolute.cli_home, PathBuf::from("/opt/hey"));
        assert_eq!(absolute.registry_url, "https://registry.npmjs.org");
    }
}
