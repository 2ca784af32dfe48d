//! Case-insensitive name matching.

use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

/// Rule deciding what counts as an occurrence of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum MatchRule {
    /// Name edges made of word characters must not touch other word characters.
    #[default]
    WordBoundary,
    /// Plain case-insensitive containment.
    Substring,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::WordBoundary => write!(f, "word-boundary"),
            MatchRule::Substring => write!(f, "substring"),
        }
    }
}

/// Compiled matcher for one name under one [`MatchRule`].
///
/// Offsets returned by [`find`](Self::find) are byte ranges into the searched
/// text, so they can be used to slice the original (not lower-cased) string.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    name: String,
    pattern: Regex,
    rule: MatchRule,
    leading_word_char: bool,
    trailing_word_char: bool,
}

impl NameMatcher {
    /// Compiles a matcher for `name`.
    ///
    /// The name is matched literally; regex metacharacters are escaped.
    pub fn new(name: &str, rule: MatchRule) -> Result<Self, AnalysisError> {
        let pattern = RegexBuilder::new(&regex::escape(name))
            .case_insensitive(true)
            .build()
            .map_err(|source| AnalysisError::InvalidPattern {
                name: name.to_string(),
                source,
            })?;

        Ok(Self {
            name: name.to_string(),
            pattern,
            rule,
            leading_word_char: name.chars().next().is_some_and(is_word_char),
            trailing_word_char: name.chars().next_back().is_some_and(is_word_char),
        })
    }

    /// The name this matcher was compiled for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the byte range of the first occurrence in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<Range<usize>> {
        self.pattern
            .find_iter(haystack)
            .map(|m| m.range())
            .find(|range| self.accepts(haystack, range))
    }

    /// Checks whether `haystack` contains the name.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.find(haystack).is_some()
    }

    fn accepts(&self, haystack: &str, range: &Range<usize>) -> bool {
        match self.rule {
            MatchRule::Substring => true,
            MatchRule::WordBoundary => {
                let before_ok = !self.leading_word_char
                    || !haystack[..range.start]
                        .chars()
                        .next_back()
                        .is_some_and(is_word_char);
                let after_ok = !self.trailing_word_char
                    || !haystack[range.end..].chars().next().is_some_and(is_word_char);
                before_ok && after_ok
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
