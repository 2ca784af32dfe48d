//! Fixed sentiment lexicons and the presence-based scoring scan.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Words that signal a favourable mention.
pub const POSITIVE_WORDS: [&str; 9] = [
    "best",
    "top",
    "leading",
    "excellent",
    "great",
    "recommended",
    "popular",
    "trusted",
    "reliable",
];

/// Words that signal a hedged or unfavourable mention.
pub const NEGATIVE_WORDS: [&str; 7] = [
    "alternative",
    "however",
    "but",
    "unfortunately",
    "lacking",
    "limited",
    "expensive",
];

/// Sentiment points per positive word present.
pub const POSITIVE_SENTIMENT_POINTS: i32 = 10;
/// Sentiment points per negative word present.
pub const NEGATIVE_SENTIMENT_POINTS: i32 = -10;
/// Prominence points per positive word present.
pub const POSITIVE_PROMINENCE_POINTS: i32 = 10;
/// Prominence points per negative word present.
pub const NEGATIVE_PROMINENCE_POINTS: i32 = -5;

/// Sentiment scores above this are positive.
pub const POSITIVE_THRESHOLD: i32 = 15;
/// Sentiment scores below this are negative.
pub const NEGATIVE_THRESHOLD: i32 = -15;

/// Coarse sentiment polarity of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favourable context.
    Positive,
    /// No clear lean either way.
    #[default]
    Neutral,
    /// Unfavourable or hedged context.
    Negative,
}

impl Sentiment {
    /// Classifies an accumulated lexicon score.
    pub fn from_score(score: i32) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Lexicon words found in a context window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconHits {
    /// Positive words present, in lexicon order.
    pub positive: Vec<&'static str>,
    /// Negative words present, in lexicon order.
    pub negative: Vec<&'static str>,
}

impl LexiconHits {
    /// Scans `context` for every lexicon word.
    ///
    /// Presence is substring containment in the lower-cased context, and each
    /// word is reported at most once however often it occurs.
    pub fn scan(context: &str) -> Self {
        let lowered = context.to_lowercase();
        let present = |words: &[&'static str]| -> Vec<&'static str> {
            words
                .iter()
                .copied()
                .filter(|word| lowered.contains(word))
                .collect()
        };

        Self {
            positive: present(&POSITIVE_WORDS),
            negative: present(&NEGATIVE_WORDS),
        }
    }

    /// Accumulated sentiment score for these hits.
    pub fn sentiment_score(&self) -> i32 {
        self.positive.len() as i32 * POSITIVE_SENTIMENT_POINTS
            + self.negative.len() as i32 * NEGATIVE_SENTIMENT_POINTS
    }

    /// Net prominence adjustment for these hits.
    pub fn prominence_delta(&self) -> i32 {
        self.positive.len() as i32 * POSITIVE_PROMINENCE_POINTS
            + self.negative.len() as i32 * NEGATIVE_PROMINENCE_POINTS
    }
}
