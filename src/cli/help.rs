//! `help-all`: every command's help in one document.

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

use crate::cli::Cli;

/// Width of the `=` rule between help sections.
const SEPARATOR_WIDTH: usize = 80;

/// Displays comprehensive help for all commands.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders help for the whole command tree.
pub struct HelpGenerator {
    app: Command,
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpGenerator {
    /// Creates a generator for the `revintel` command tree.
    pub fn new() -> Self {
        Self {
            app: Cli::command(),
        }
    }

    /// Generates help for the root command followed by every subcommand.
    pub fn generate_all_help(&self) -> Result<String> {
        let mut sections = vec![self.render_command_help(&self.app, "")];
        Self::collect_sections(&self.app, "", &mut |cmd, path| {
            sections.push(self.render_command_help(cmd, path));
        });

        let separator = format!("\n\n{}\n\n", "=".repeat(SEPARATOR_WIDTH));
        Ok(sections.join(&separator))
    }

    /// Walks subcommands depth-first, sorted by name so the output is stable.
    fn collect_sections(cmd: &Command, prefix: &str, visit: &mut dyn FnMut(&Command, &str)) {
        let mut subcommands: Vec<_> = cmd
            .get_subcommands()
            // clap's generated `help` subcommand
            .filter(|sub| sub.get_name() != "help")
            .collect();
        subcommands.sort_by(|a, b| a.get_name().cmp(b.get_name()));

        for sub in subcommands {
            let path = if prefix.is_empty() {
                sub.get_name().to_string()
            } else {
                format!("{prefix} {}", sub.get_name())
            };
            visit(sub, &path);
            Self::collect_sections(sub, &path, visit);
        }
    }

    fn render_command_help(&self, cmd: &Command, path: &str) -> String {
        let title = if path.is_empty() {
            cmd.get_name().to_string()
        } else {
            format!("{} {path}", self.app.get_name())
        };
        let about = cmd
            .get_about()
            .map_or_else(|| "No description available".to_string(), ToString::to_string);

        format!("{title} - {about}\n\n{}", cmd.clone().render_help())
    }
}

impl HelpCommand {
    /// Executes the help command.
    pub fn execute(self) -> Result<()> {
        println!("{}", HelpGenerator::new().generate_all_help()?);
        Ok(())
    }
}
