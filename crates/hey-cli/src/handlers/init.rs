use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use hey_core::{Config, InitOptions, is_dir_empty};

pub struct InitHandler;

impl InitHandler {
    pub async fn init_project(
        project_name: &str,
        force: bool,
        template: String,
        target_path: Option<PathBuf>,
        config: &Config,
    ) -> Result<()> {
        Self::print_init_header(project_name);

        let project_dir = std::env::current_dir()?.join(project_name.trim());
        let force = force || Self::confirm_non_empty(&project_dir)?;

        let options = InitOptions {
            force,
            target_path,
            template,
        };
        let created = hey_core::init(project_name, &options, config).await?;

        hey_logger::finish(&format!("Created {}", created.display()));
        println!();
        println!("  {} {}", "cd".bright_cyan().bold(), project_name.bright_white());
        println!();
        Ok(())
    }

    /// Ask before writing into a directory that already has content. Returns
    /// `false` when the directory is empty and no prompt was needed.
    fn confirm_non_empty(project_dir: &std::path::Path) -> Result<bool> {
        if is_dir_empty(project_dir)? {
            return Ok(false);
        }

        let confirmed = inquire::Confirm::new(&format!(
            "{} is not empty. Continue anyway?",
            project_dir.display()
        ))
        .with_default(false)
        .prompt()?;

        if !confirmed {
            bail!("Aborted: {} is not empty", project_dir.display());
        }
        Ok(true)
    }

    fn print_init_header(project_name: &str) {
        println!(
            "{} {} {}",
            "hey".bright_cyan().bold(),
            "init".bright_white(),
            project_name.bright_white()
        );
        println!();
    }
}
