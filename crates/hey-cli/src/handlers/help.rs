use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use hey_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, REPOSITORY_URL, VERSION};

const GLOBAL_OPTIONS: &[(&str, &str)] = &[
    ("-t, --target-path <PATH>", "Use a local template package"),
    ("--mirror", "Resolve packages through the npm mirror"),
    ("--no-update-check", "Skip the self-update check"),
    ("--debug", "Print verbose output"),
    ("-V, --version", "Print version"),
];

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(cmd) => Self::show_command_help(cmd),
            None => {
                Self::show_general_help();
                Ok(())
            }
        }
    }

    fn show_command_help(command: &str) -> Result<()> {
        let mut cli = Cli::command();

        if let Some(subcommand) = cli.find_subcommand_mut(command) {
            subcommand.print_help()?;
        } else {
            hey_logger::error(&format!("Unknown command '{command}'"));
            println!();
            Self::show_general_help();
        }

        println!();
        Ok(())
    }

    fn show_general_help() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        println!("{}", "Usage:".bright_magenta().bold());
        println!(
            "  {} {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "[OPTIONS]".bright_black().bold(),
            "<COMMAND>".bright_white(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        println!("{}", "Commands:".bright_magenta().bold());
        let commands: Vec<(String, &str)> = COMMANDS
            .iter()
            .map(|(cmd, desc, aliases)| {
                if aliases.is_empty() {
                    ((*cmd).to_string(), *desc)
                } else {
                    (format!("{cmd} [{}]", aliases.join(", ")), *desc)
                }
            })
            .collect();
        Self::print_table(&commands);

        println!("{}", "Options:".bright_magenta().bold());
        let options: Vec<(String, &str)> = GLOBAL_OPTIONS
            .iter()
            .map(|(flag, desc)| ((*flag).to_string(), *desc))
            .collect();
        Self::print_table(&options);

        println!("{}", "Examples:".bright_magenta().bold());
        let examples: Vec<(String, &str)> = EXAMPLES
            .iter()
            .map(|(cmd, desc)| ((*cmd).to_string(), *desc))
            .collect();
        Self::print_table(&examples);

        println!(
            "{} {} {} {}",
            "Run".bright_black(),
            format!("{BIN_NAME} help <command>").bright_cyan(),
            "for details on a command. Visit".bright_black(),
            REPOSITORY_URL.bright_cyan().underline()
        );
    }

    /// Two-column listing. Padding is computed on the plain text so colour
    /// codes don't skew the alignment.
    fn print_table(rows: &[(String, &str)]) {
        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);

        for (left, right) in rows {
            let padding = " ".repeat(width - left.len());
            println!(
                "  {}{padding}  # {}",
                left.bright_cyan().bold(),
                right.bright_black().bold()
            );
        }
        println!();
    }
}
