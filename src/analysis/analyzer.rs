//! Mention detection, position tiering, and prominence scoring.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::AnalysisError;
use super::lexicon::{LexiconHits, Sentiment};
use super::matcher::{MatchRule, NameMatcher};

/// Default number of characters kept on each side of a mention.
pub const DEFAULT_CONTEXT_RADIUS: usize = 200;

/// Sentence boundaries used for position tiering.
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// A numbered list item such as `1. Acme` or `  3) Globex`.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([0-9]+)[.)]\s").unwrap());

/// Prominence for a mention in the first ranked-list item.
const RANKED_LIST_TOP_SCORE: i64 = 100;
/// Prominence lost per list rank below the first.
const RANKED_LIST_STEP: i64 = 15;
/// Lowest prominence a ranked-list item can score.
const RANKED_LIST_FLOOR: i64 = 40;

/// Position and prominence policy for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ScoringMode {
    /// Free-form prose: sentence ordinal tiers plus lexicon adjustments.
    #[default]
    Sentence,
    /// Enumerated answers: literal list rank, or character offset without a list.
    RankedList,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Sentence => write!(f, "sentence"),
            ScoringMode::RankedList => write!(f, "ranked-list"),
        }
    }
}

/// Result of analyzing one text for one name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionAnalysis {
    /// Whether the name occurs in the text.
    pub mentioned: bool,
    /// Sentence ordinal or list rank of the mention, when one was found.
    pub position: Option<u32>,
    /// Heuristic prominence in `[0, 100]`.
    pub prominence_score: u8,
    /// Raw lexicon score backing [`sentiment`](Self::sentiment).
    pub sentiment_score: i32,
    /// Polarity of the text around the mention.
    pub sentiment: Sentiment,
    /// Source text surrounding the first mention.
    pub context: String,
}

impl MentionAnalysis {
    /// The analysis for a text that does not mention the name.
    pub fn not_mentioned() -> Self {
        Self::default()
    }

    /// Prominence as a fraction in `[0.0, 1.0]`.
    pub fn prominence_fraction(&self) -> f64 {
        f64::from(self.prominence_score) / 100.0
    }
}

/// Tunables for [`MentionAnalyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Characters kept before and after the mention in the context window.
    pub context_radius: usize,
    /// How occurrences of a name are recognised.
    pub match_rule: MatchRule,
    /// Policy used by [`MentionAnalyzer::analyze`].
    pub scoring_mode: ScoringMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            match_rule: MatchRule::default(),
            scoring_mode: ScoringMode::default(),
        }
    }
}

/// Scores how prominently and favourably a name is mentioned in a text.
///
/// The analyzer is stateless apart from its configuration and can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct MentionAnalyzer {
    config: AnalyzerConfig,
}

impl MentionAnalyzer {
    /// Creates an analyzer with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes `text` for `name` using the configured scoring mode.
    pub fn analyze(&self, text: &str, name: &str) -> MentionAnalysis {
        self.analyze_with_mode(text, name, self.config.scoring_mode)
    }

    /// Analyzes `text` for `name` using an explicit scoring mode.
    ///
    /// Empty text or a blank name yields [`MentionAnalysis::not_mentioned`].
    pub fn analyze_with_mode(&self, text: &str, name: &str, mode: ScoringMode) -> MentionAnalysis {
        if text.is_empty() {
            return MentionAnalysis::not_mentioned();
        }
        match self.matcher(name) {
            Some(matcher) => self.analyze_matched(text, &matcher, mode),
            None => MentionAnalysis::not_mentioned(),
        }
    }

    /// Compiles a matcher for `name` under the configured match rule.
    ///
    /// Returns `None` for a blank name. A pattern that fails to compile is
    /// logged and also yields `None`, so the name is never reported as
    /// mentioned.
    pub fn matcher(&self, name: &str) -> Option<NameMatcher> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        match NameMatcher::new(name, self.config.match_rule) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                warn!(error = %e, "Skipping mention analysis");
                None
            }
        }
    }

    /// Analyzes `text` with a matcher built by [`matcher`](Self::matcher).
    ///
    /// Lets callers that score many texts for the same name compile its
    /// pattern once.
    pub fn analyze_matched(
        &self,
        text: &str,
        matcher: &NameMatcher,
        mode: ScoringMode,
    ) -> MentionAnalysis {
        let Some(span) = matcher.find(text) else {
            return MentionAnalysis::not_mentioned();
        };

        let context = context_window(text, &span, self.config.context_radius).to_string();
        let hits = LexiconHits::scan(&context);
        let sentiment_score = hits.sentiment_score();

        let (position, prominence) = match mode {
            ScoringMode::Sentence => {
                let position = sentence_position(text, &matcher);
                (
                    position,
                    i64::from(sentence_base_score(position) + hits.prominence_delta()),
                )
            }
            ScoringMode::RankedList => match list_position(text, &matcher) {
                Some(rank) => (Some(rank), ranked_list_score(rank)),
                None => (None, offset_score(text, span.start)),
            },
        };

        let prominence_score = prominence.clamp(0, 100) as u8;

        debug!(
            entity = matcher.name(),
            %mode,
            ?position,
            prominence_score,
            sentiment_score,
            positive_hits = ?hits.positive,
            negative_hits = ?hits.negative,
            "Analyzed mention"
        );

        MentionAnalysis {
            mentioned: true,
            position,
            prominence_score,
            sentiment_score,
            sentiment: Sentiment::from_score(sentiment_score),
            context,
        }
    }
}

/// Rejects requests the analyzer would silently treat as "not mentioned".
///
/// Call this at API and CLI boundaries where a blank name is a caller bug.
pub fn validate_request(text: &str, name: &str) -> Result<(), AnalysisError> {
    if name.trim().is_empty() {
        return Err(AnalysisError::InvalidArgument(
            "name must not be empty".to_string(),
        ));
    }
    if text.trim().is_empty() {
        debug!(entity = name, "Analyzing empty text");
    }
    Ok(())
}

/// 1-based index of the first sentence fragment containing the name.
fn sentence_position(text: &str, matcher: &NameMatcher) -> Option<u32> {
    SENTENCE_BOUNDARY
        .split(text)
        .position(|fragment| matcher.is_match(fragment))
        .and_then(|index| u32::try_from(index + 1).ok())
}

fn sentence_base_score(position: Option<u32>) -> i32 {
    match position {
        Some(1) => 40,
        Some(2) => 30,
        Some(3) => 20,
        _ => 10,
    }
}

/// Literal number of the first list item containing the name.
fn list_position(text: &str, matcher: &NameMatcher) -> Option<u32> {
    text.lines().find_map(|line| {
        let captures = LIST_ITEM.captures(line)?;
        if !matcher.is_match(line) {
            return None;
        }
        // Numbers past u32 still rank, just at the floor.
        Some(captures.get(1)?.as_str().parse().unwrap_or(u32::MAX))
    })
}

fn ranked_list_score(rank: u32) -> i64 {
    let score = RANKED_LIST_TOP_SCORE - (i64::from(rank) - 1) * RANKED_LIST_STEP;
    score.max(RANKED_LIST_FLOOR)
}

/// Linear score from how early the mention starts, by character offset.
fn offset_score(text: &str, byte_offset: usize) -> i64 {
    let total = text.chars().count();
    if total == 0 {
        return 0;
    }
    let offset = text[..byte_offset].chars().count();
    ((1.0 - offset as f64 / total as f64) * 100.0).round() as i64
}

/// Slice of `text` spanning `radius` characters either side of `span`.
fn context_window<'a>(text: &'a str, span: &Range<usize>, radius: usize) -> &'a str {
    let start = text[..span.start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(span.start, |(i, _)| i);
    let end = text[span.end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| span.end + i);
    &text[start..end]
}
