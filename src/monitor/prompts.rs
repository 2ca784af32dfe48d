//! Prompt templates for monitoring runs.

use serde::{Deserialize, Serialize};

use crate::analysis::ScoringMode;

/// Placeholder replaced with the configured industry.
const INDUSTRY_PLACEHOLDER: &str = "{industry}";

/// System prompt sent with every monitoring request.
const SYSTEM_PROMPT_TEMPLATE: &str =
    "You are a helpful assistant answering questions about the {industry} market.";

/// Prose questions, scored by sentence position.
const PROSE_PROMPT_TEMPLATES: [&str; 3] = [
    "What are the best {industry} options available today?",
    "Which {industry} companies would you recommend, and why?",
    "What should I consider when choosing a {industry} provider?",
];

/// Ranking question, scored by list position.
const RANKING_PROMPT_TEMPLATE: &str =
    "List the top 10 {industry} companies as a numbered list, ranked from best to worst.";

/// A prompt sent to every monitored platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorPrompt {
    /// Question text.
    pub text: String,
    /// Scoring policy for answers; the analyzer default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ScoringMode>,
}

impl MonitorPrompt {
    /// Creates a prompt that uses the analyzer's default scoring mode.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: None,
        }
    }

    /// Creates a prompt with an explicit scoring mode.
    pub fn with_mode(text: impl Into<String>, mode: ScoringMode) -> Self {
        Self {
            text: text.into(),
            mode: Some(mode),
        }
    }

    /// Scoring mode to apply, falling back to `default`.
    pub fn scoring_mode(&self, default: ScoringMode) -> ScoringMode {
        self.mode.unwrap_or(default)
    }
}

/// Builds the system prompt for an industry.
pub fn system_prompt(industry: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace(INDUSTRY_PLACEHOLDER, industry.trim())
}

/// Generates the default prompt set for an industry.
///
/// Three prose questions are scored in sentence mode and one numbered ranking
/// request in ranked-list mode.
pub fn default_prompts(industry: &str) -> Vec<MonitorPrompt> {
    let industry = industry.trim();
    let mut prompts: Vec<MonitorPrompt> = PROSE_PROMPT_TEMPLATES
        .iter()
        .map(|template| {
            MonitorPrompt::with_mode(
                template.replace(INDUSTRY_PLACEHOLDER, industry),
                ScoringMode::Sentence,
            )
        })
        .collect();
    prompts.push(MonitorPrompt::with_mode(
        RANKING_PROMPT_TEMPLATE.replace(INDUSTRY_PLACEHOLDER, industry),
        ScoringMode::RankedList,
    ));
    prompts
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_the_industry() {
        assert_eq!(
            system_prompt(" CRM software "),
            "You are a helpful assistant answering questions about the CRM software market."
        );
    }

    #[test]
    fn default_prompts_mix_modes() {
        let prompts = default_prompts("CRM software");
        assert_eq!(prompts.len(), 4);
        assert!(prompts.iter().all(|p| p.text.contains("CRM software")));
        assert!(prompts.iter().all(|p| !p.text.contains('{')));

        let modes: Vec<_> = prompts.iter().map(|p| p.mode).collect();
        assert_eq!(
            modes,
            vec![
                Some(ScoringMode::Sentence),
                Some(ScoringMode::Sentence),
                Some(ScoringMode::Sentence),
                Some(ScoringMode::RankedList),
            ]
        );
    }

    #[test]
    fn prompt_without_mode_uses_default() {
        let prompt = MonitorPrompt::new("Who leads?");
        assert_eq!(
            prompt.scoring_mode(ScoringMode::RankedList),
            ScoringMode::RankedList
        );
        let explicit = MonitorPrompt::with_mode("Rank them", ScoringMode::Sentence);
        assert_eq!(
            explicit.scoring_mode(ScoringMode::RankedList),
            ScoringMode::Sentence
        );
    }

    #[test]
    fn prompt_deserializes_camel_case_mode() {
        let prompt: MonitorPrompt =
            serde_yaml::from_str("text: List them\nmode: rankedList\n").unwrap();
        assert_eq!(prompt.mode, Some(ScoringMode::RankedList));
        let plain: MonitorPrompt = serde_yaml::from_str("text: Who?\n").unwrap();
        assert_eq!(plain.mode, None);
    }
}
