use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hey_constants::DEFAULT_TEMPLATE;

#[derive(Parser)]
#[command(name = "hey")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Scaffold new projects from npm-hosted templates", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable debug mode for verbose output
    #[arg(long, global = true)]
    pub debug: bool,
    /// Use a local template package instead of downloading one
    #[arg(short = 't', long = "target-path", global = true)]
    pub target_path: Option<PathBuf>,
    /// Resolve packages through the npm mirror
    #[arg(long, global = true)]
    pub mirror: bool,
    /// Skip checking the registry for a newer hey release
    #[arg(long = "no-update-check", global = true)]
    pub no_update_check: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Creates a new project from a template package
    #[command(aliases = ["new", "create"])]
    Init {
        /// Name of the project directory to create
        project_name: String,
        /// Use the directory even if it is not empty
        #[arg(short = 'f', long = "force")]
        force: bool,
        /// Template package to use (e.g. @hey-cli/template-vue@1.2.0)
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        template: String,
    },
    /// Shows help information for hey or a specific command
    Help {
        /// The command to show help for (optional)
        #[arg()]
        command: Option<String>,
    },
}
