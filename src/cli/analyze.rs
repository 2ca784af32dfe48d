//! Single-text mention analysis command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::analysis::{
    validate_request, AnalyzerConfig, MatchRule, MentionAnalysis, MentionAnalyzer, ScoringMode,
    Sentiment, DEFAULT_CONTEXT_RADIUS,
};
use crate::data::{to_yaml, OutputFormat};

use super::formatting::render_analysis;

/// Analyzes a block of text for mentions of a name.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Brand or competitor name to look for.
    #[arg(long)]
    pub name: String,

    /// File containing the text to analyze (reads stdin when omitted).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Scoring policy: sentence tiers for prose, list ranks for numbered answers.
    #[arg(long, value_enum, default_value_t = ScoringMode::Sentence)]
    pub mode: ScoringMode,

    /// How occurrences of the name are recognised.
    #[arg(long, value_enum, default_value_t = MatchRule::WordBoundary)]
    pub match_rule: MatchRule,

    /// Characters of context kept on each side of the mention.
    #[arg(long, default_value_t = DEFAULT_CONTEXT_RADIUS)]
    pub context_radius: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Emits prominence as a 0.0-1.0 fraction in JSON and YAML output.
    #[arg(long)]
    pub fraction: bool,
}

/// Prominence on the scale the caller asked for.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Prominence {
    Score(u8),
    Fraction(f64),
}

/// Serialized form of an analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisOutput<'a> {
    name: &'a str,
    scoring_mode: ScoringMode,
    mentioned: bool,
    position: Option<u32>,
    prominence: Prominence,
    sentiment_score: i32,
    sentiment: Sentiment,
    context: &'a str,
}

impl<'a> AnalysisOutput<'a> {
    fn new(name: &'a str, mode: ScoringMode, analysis: &'a MentionAnalysis, fraction: bool) -> Self {
        let prominence = if fraction {
            Prominence::Fraction(analysis.prominence_fraction())
        } else {
            Prominence::Score(analysis.prominence_score)
        };
        Self {
            name,
            scoring_mode: mode,
            mentioned: analysis.mentioned,
            position: analysis.position,
            prominence,
            sentiment_score: analysis.sentiment_score,
            sentiment: analysis.sentiment,
            context: &analysis.context,
        }
    }
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        let text = self.read_input()?;
        let output = self.render(&text)?;
        print!("{output}");
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read text from stdin")?;
                Ok(text)
            }
        }
    }

    /// Analyzes `text` and renders the result in the requested format.
    pub fn render(&self, text: &str) -> Result<String> {
        validate_request(text, &self.name)?;

        let analyzer = MentionAnalyzer::new(AnalyzerConfig {
            context_radius: self.context_radius,
            match_rule: self.match_rule,
            scoring_mode: self.mode,
        });
        let analysis = analyzer.analyze(text, &self.name);
        let name = self.name.trim();

        match self.format {
            OutputFormat::Text => Ok(render_analysis(name, self.mode, &analysis)),
            OutputFormat::Json => {
                let output = AnalysisOutput::new(name, self.mode, &analysis, self.fraction);
                let mut json = serde_json::to_string_pretty(&output)
                    .context("Failed to serialize analysis to JSON")?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Yaml => {
                let output = AnalysisOutput::new(name, self.mode, &analysis, self.fraction);
                let mut yaml = to_yaml(&output)?;
                yaml.push('\n');
                Ok(yaml)
            }
        }
    }
}
