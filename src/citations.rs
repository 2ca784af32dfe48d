//! Source citations embedded in AI platform responses.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Candidate URLs in free text. Trailing punctuation is trimmed afterwards.
static URL_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'`\]\[(){}]+"#).unwrap());

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '>', '\'', '"'];

/// A URL cited in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// The URL as it appeared in the text, minus trailing punctuation.
    pub url: String,
    /// Lower-cased host without a leading `www.`.
    pub domain: String,
}

impl Citation {
    /// Checks whether this citation points at `domain` or one of its subdomains.
    pub fn matches_domain(&self, domain: &str) -> bool {
        let Some(target) = normalize_domain(domain) else {
            return false;
        };
        self.domain == target || self.domain.ends_with(&format!(".{target}"))
    }
}

/// Extracts unique `http(s)` citations from `text` in first-seen order.
pub fn extract_citations(text: &str) -> Vec<Citation> {
    let mut seen = HashSet::new();

    URL_CANDIDATE
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            let parsed = Url::parse(raw).ok()?;
            let domain = strip_www(&parsed.host_str()?.to_lowercase()).to_string();
            Some(Citation {
                url: raw.to_string(),
                domain,
            })
        })
        .filter(|citation| seen.insert(citation.url.clone()))
        .collect()
}

/// Reduces a domain or URL as users type it (`https://www.Acme.com/about`)
/// to a bare host (`acme.com`).
pub fn normalize_domain(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let host = if trimmed.contains("://") {
        Url::parse(trimmed).ok()?.host_str()?.to_lowercase()
    } else {
        trimmed
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase()
    };

    let host = strip_www(host.trim_end_matches('.'));
    (!host.is_empty()).then(|| host.to_string())
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
