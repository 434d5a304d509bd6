pub mod commands;
pub mod config;
pub mod handlers;

use clap::Parser;

use commands::{Cli, Commands};
use handlers::{HelpHandler, InitHandler, UpdateHandler};

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    hey_logger::init_logger(false);

    if let Commands::Help { command } = &cli.command {
        return HelpHandler::handle_help(command.as_deref());
    }

    let config = config::load_config(&cli)?;
    config.check_home_dir()?;
    hey_logger::debug(
        &format!(
            "cli home {}, registry {}",
            config.cli_home.display(),
            config.registry_url
        ),
        config.debug,
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        if !cli.no_update_check {
            UpdateHandler::notify_if_outdated(&config).await;
        }

        match cli.command {
            Commands::Init {
                project_name,
                force,
                template,
            } => {
                InitHandler::init_project(
                    &project_name,
                    force,
                    template,
                    cli.target_path,
                    &config,
                )
                .await
            }
            Commands::Help { command } => HelpHandler::handle_help(command.as_deref()),
        }
    })
}
