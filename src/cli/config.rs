//! Configuration and reference information commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::ai::Platform;
use crate::analysis::lexicon::{
    NEGATIVE_PROMINENCE_POINTS, NEGATIVE_SENTIMENT_POINTS, NEGATIVE_THRESHOLD, NEGATIVE_WORDS,
    POSITIVE_PROMINENCE_POINTS, POSITIVE_SENTIMENT_POINTS, POSITIVE_THRESHOLD, POSITIVE_WORDS,
};
use crate::utils::platform_credential_status;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the sentiment lexicons and thresholds.
    Lexicon(LexiconCommand),
    /// Lists supported platforms, default models and API key variables.
    Platforms(PlatformsCommand),
}

/// Lexicon command options.
#[derive(Parser)]
pub struct LexiconCommand {}

/// Platforms command options.
#[derive(Parser)]
pub struct PlatformsCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Lexicon(cmd) => cmd.execute(),
            ConfigSubcommands::Platforms(cmd) => cmd.execute(),
        }
    }
}

impl LexiconCommand {
    /// Executes the lexicon command.
    pub fn execute(self) -> Result<()> {
        print!("{}", render_lexicon());
        Ok(())
    }
}

impl PlatformsCommand {
    /// Executes the platforms command.
    pub fn execute(self) -> Result<()> {
        print!("{}", render_platforms());
        Ok(())
    }
}

fn render_lexicon() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Positive words (sentiment {:+}, prominence {:+}):\n",
        POSITIVE_SENTIMENT_POINTS, POSITIVE_PROMINENCE_POINTS
    ));
    out.push_str(&format!("   {}\n", POSITIVE_WORDS.join(", ")));
    out.push_str(&format!(
        "Negative words (sentiment {:+}, prominence {:+}):\n",
        NEGATIVE_SENTIMENT_POINTS, NEGATIVE_PROMINENCE_POINTS
    ));
    out.push_str(&format!("   {}\n", NEGATIVE_WORDS.join(", ")));
    out.push_str(&format!(
        "Sentiment is positive above {:+} and negative below {:+}.\n",
        POSITIVE_THRESHOLD, NEGATIVE_THRESHOLD
    ));
    out
}

fn render_platforms() -> String {
    let mut out = String::new();
    for status in platform_credential_status(&Platform::ALL) {
        let platform = status.platform;
        let key = if status.available { "✅" } else { "❌" };
        out.push_str(&format!(
            "{key} {:<11} model {:<26} key {}\n",
            platform.id(),
            platform.default_model(),
            platform.api_key_vars().join(" | ")
        ));
    }
    out
}
