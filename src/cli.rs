//! CLI interface for revintel.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod analyze;
pub mod config;
pub mod formatting;
pub mod help;
pub mod monitor;

/// revintel: brand visibility in AI assistant answers.
#[derive(Parser)]
#[command(name = "revintel")]
#[command(
    about = "Brand visibility monitoring for AI assistant answers",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyzes a block of text for mentions of a brand or competitor.
    Analyze(analyze::AnalyzeCommand),
    /// Queries AI platforms with industry prompts and reports brand visibility.
    Monitor(monitor::MonitorCommand),
    /// Lexicon and platform information.
    Config(config::ConfigCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(cmd) => cmd.execute(),
            Commands::Monitor(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(),
            Commands::HelpAll(cmd) => cmd.execute(),
        }
    }
}
