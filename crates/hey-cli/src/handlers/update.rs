use owo_colors::OwoColorize;

use hey_constants::{PACKAGE_NAME, VERSION};
use hey_core::{Config, check_for_update};

pub struct UpdateHandler;

impl UpdateHandler {
    /// Warn when a newer CLI release exists. Never fails the command.
    pub async fn notify_if_outdated(config: &Config) {
        let result = match config.registry() {
            Ok(registry) => check_for_update(&registry).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(latest)) => {
                hey_logger::warn(&format!(
                    "A new version of hey is available: {} -> {}",
                    VERSION,
                    latest.bright_green()
                ));
                hey_logger::warn(&format!(
                    "Run {} to update",
                    format!("npm install -g {PACKAGE_NAME}").bright_cyan()
                ));
            }
            Ok(None) => {}
            Err(e) => hey_logger::debug(&format!("Update check skipped: {e}"), config.debug),
        }
    }
}
