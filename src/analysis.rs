//! Brand mention analysis for AI platform responses.
//!
//! Given a block of free text and a brand or competitor name, the analyzer
//! reports whether the name is mentioned, where, how prominently, and with
//! what sentiment. Two scoring policies are available through
//! [`ScoringMode`]: sentence tiers for prose answers and list ranks for
//! numbered answers.

pub mod analyzer;
pub mod error;
pub mod lexicon;
pub mod matcher;

pub use analyzer::{
    validate_request, AnalyzerConfig, MentionAnalysis, MentionAnalyzer, ScoringMode,
    DEFAULT_CONTEXT_RADIUS,
};
pub use error::AnalysisError;
pub use lexicon::{LexiconHits, Sentiment};
pub use matcher::{MatchRule, NameMatcher};

/// Analyzes `text` for `name` with the default configuration.
pub fn analyze(text: &str, name: &str) -> MentionAnalysis {
    MentionAnalyzer::default().analyze(text, name)
}

/// Analyzes `text` for `name` with the default configuration and an explicit mode.
pub fn analyze_with_mode(text: &str, name: &str, mode: ScoringMode) -> MentionAnalysis {
    MentionAnalyzer::default().analyze_with_mode(text, name, mode)
}
