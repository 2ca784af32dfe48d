//! Monitoring configuration loaded from YAML.
//!
//! ```yaml
//! brand: { name: Acme, domain: acme.com }
//! industry: project management software
//! competitors: [Globex, Initech]
//! platforms: [chatgpt, perplexity]
//! prompts:
//!   - text: List the top 10 project management tools.
//!     mode: rankedList
//! analyzer: { contextRadius: 200, matchRule: wordBoundary }
//! concurrency: 4
//! models: { chatgpt: gpt-4o-mini }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{ClientOverrides, Platform};
use crate::analysis::{AnalysisError, AnalyzerConfig, MentionAnalyzer};
use crate::citations::normalize_domain;
use crate::data::{from_yaml, read_yaml_file, ReportSubject};
use crate::monitor::{default_prompts, MonitorPrompt};

/// Requests in flight when the config does not say otherwise.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// The brand being monitored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandConfig {
    /// Brand name as it appears in answers.
    pub name: String,
    /// Brand website, used to count brand citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// A complete monitoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Brand to track.
    pub brand: BrandConfig,
    /// Industry the prompts ask about.
    pub industry: String,
    /// Competitors tracked alongside the brand.
    #[serde(default)]
    pub competitors: Vec<String>,
    /// Platforms to query.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
    /// Prompts to send; generated from the industry when empty.
    #[serde(default)]
    pub prompts: Vec<MonitorPrompt>,
    /// Analyzer tunables.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Maximum concurrent platform requests.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-platform model overrides.
    #[serde(default)]
    pub models: BTreeMap<Platform, String>,
    /// Per-platform endpoint overrides, e.g. for a gateway.
    #[serde(default)]
    pub endpoints: BTreeMap<Platform, String>,
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl MonitorConfig {
    /// Reads, parses and validates a configuration file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config: Self = read_yaml_file(path)?;
        config
            .prepare()
            .with_context(|| format!("Invalid monitoring config: {}", path.display()))?;

        debug!(
            path = %path.display(),
            brand = %config.brand.name,
            platforms = config.platforms.len(),
            "Loaded monitoring config"
        );
        Ok(config)
    }

    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config: Self = from_yaml(yaml)?;
        config.prepare()?;
        Ok(config)
    }

    fn prepare(&mut self) -> Result<(), AnalysisError> {
        self.normalize();
        self.validate()
    }

    /// Trims names, normalizes the brand domain and drops duplicate platforms.
    fn normalize(&mut self) {
        self.brand.name = self.brand.name.trim().to_string();
        self.industry = self.industry.trim().to_string();
        for competitor in &mut self.competitors {
            *competitor = competitor.trim().to_string();
        }
        if let Some(domain) = self.brand.domain.take() {
            self.brand.domain = normalize_domain(&domain);
        }

        let mut seen = Vec::with_capacity(self.platforms.len());
        self.platforms.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(*p);
                true
            }
        });
    }

    /// Checks the configuration for values a run cannot work with.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.brand.name.trim().is_empty() {
            return Err(invalid("brand name must not be empty"));
        }
        if self.industry.trim().is_empty() {
            return Err(invalid("industry must not be empty"));
        }
        if let Some(index) = self.competitors.iter().position(|c| c.trim().is_empty()) {
            return Err(invalid(format!(
                "competitor #{} has an empty name",
                index + 1
            )));
        }
        if self.platforms.is_empty() {
            return Err(invalid("at least one platform is required"));
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1"));
        }
        if self.analyzer.context_radius == 0 {
            return Err(invalid("analyzer contextRadius must be at least 1"));
        }
        if let Some(index) = self.prompts.iter().position(|p| p.text.trim().is_empty()) {
            return Err(invalid(format!("prompt #{} has empty text", index + 1)));
        }
        Ok(())
    }

    /// Prompts to send: the configured list, or the generated defaults.
    pub fn resolved_prompts(&self) -> Vec<MonitorPrompt> {
        if self.prompts.is_empty() {
            default_prompts(&self.industry)
        } else {
            self.prompts.clone()
        }
    }

    /// Report subject for this configuration.
    pub fn subject(&self) -> ReportSubject {
        ReportSubject {
            brand: self.brand.name.clone(),
            domain: self.brand.domain.clone(),
            industry: self.industry.clone(),
            competitors: self.competitors.clone(),
        }
    }

    /// Analyzer built from the configured tunables.
    pub fn analyzer(&self) -> MentionAnalyzer {
        MentionAnalyzer::new(self.analyzer)
    }

    /// Model and endpoint overrides for one platform.
    pub fn client_overrides(&self, platform: Platform) -> ClientOverrides {
        ClientOverrides {
            model: self.models.get(&platform).cloned(),
            endpoint: self.endpoints.get(&platform).cloned(),
        }
    }
}

fn invalid(message: impl Into<String>) -> AnalysisError {
    AnalysisError::InvalidArgument(message.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::analysis::{MatchRule, ScoringMode};

    const FULL_CONFIG: &str = r"
brand:
  name: ' Acme '
  domain: https://www.Acme.com/about
industry: project management software
competitors: [Globex, Initech]
platforms: [chatgpt, perplexity, chatgpt]
prompts:
  - text: What is the best project management software?
  - text: List the top 10 project management tools.
    mode: rankedList
analyzer:
  contextRadius: 120
  matchRule: substring
  scoringMode: sentence
concurrency: 2
models:
  chatgpt: gpt-4o
endpoints:
  perplexity: http://localhost:9000/chat/completions
";

    #[test]
    fn parses_full_config() {
        let config = MonitorConfig::from_yaml_str(FULL_CONFIG).unwrap();

        assert_eq!(config.brand.name, "Acme");
        assert_eq!(config.brand.domain.as_deref(), Some("acme.com"));
        assert_eq!(config.competitors, vec!["Globex", "Initech"]);
        assert_eq!(config.platforms, vec![Platform::ChatGpt, Platform::Perplexity]);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.analyzer.context_radius, 120);
        assert_eq!(config.analyzer.match_rule, MatchRule::Substring);
        assert_eq!(config.prompts[0].mode, None);
        assert_eq!(config.prompts[1].mode, Some(ScoringMode::RankedList));

        let overrides = config.client_overrides(Platform::ChatGpt);
        assert_eq!(overrides.model.as_deref(), Some("gpt-4o"));
        assert_eq!(overrides.endpoint, None);
        assert_eq!(
            config.client_overrides(Platform::Perplexity).endpoint.as_deref(),
            Some("http://localhost:9000/chat/completions")
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config =
            MonitorConfig::from_yaml_str("brand: { name: Acme }\nindustry: widgets\n").unwrap();

        assert_eq!(config.platforms, Platform::ALL.to_vec());
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.analyzer, AnalyzerConfig::default());
        assert!(config.competitors.is_empty());
        assert_eq!(config.brand.domain, None);

        let prompts = config.resolved_prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].text.contains("widgets"));
    }

    #[test]
    fn configured_prompts_replace_defaults() {
        let config = MonitorConfig::from_yaml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.resolved_prompts(), config.prompts);
    }

    #[test]
    fn blank_brand_is_invalid_argument() {
        let err = MonitorConfig::from_yaml_str("brand: { name: '  ' }\nindustry: widgets\n")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::InvalidArgument(msg)) if msg.contains("brand name")
        ));
    }

    #[test]
    fn rejects_unusable_values() {
        let cases = [
            ("brand: { name: Acme }\nindustry: ''\n", "industry"),
            (
                "brand: { name: Acme }\nindustry: w\ncompetitors: [Globex, '']\n",
                "competitor #2",
            ),
            ("brand: { name: Acme }\nindustry: w\nplatforms: []\n", "platform"),
            ("brand: { name: Acme }\nindustry: w\nconcurrency: 0\n", "concurrency"),
            (
                "brand: { name: Acme }\nindustry: w\nanalyzer: { contextRadius: 0 }\n",
                "contextRadius",
            ),
            (
                "brand: { name: Acme }\nindustry: w\nprompts: [{ text: ' ' }]\n",
                "prompt #1",
            ),
        ];
        for (yaml, needle) in cases {
            let err = MonitorConfig::from_yaml_str(yaml).unwrap_err();
            assert!(
                err.to_string().contains(needle),
                "expected {needle:?} in {err}"
            );
        }
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = MonitorConfig::from_yaml_str(
            "brand: { name: Acme }\nindustry: w\nplatforms: [altavista]\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("altavista"));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("monitor.yaml");
        fs::write(&path, FULL_CONFIG).unwrap();

        let config = MonitorConfig::load_from_path(&path).unwrap();
        let subject = config.subject();
        assert_eq!(subject.brand, "Acme");
        assert_eq!(subject.industry, "project management software");
        assert_eq!(config.analyzer().config().context_radius, 120);
    }

    #[test]
    fn load_from_path_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = MonitorConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));

        let bad = dir.path().join("bad.yaml");
        fs::write(&bad, "brand: { name: '' }\nindustry: w\n").unwrap();
        let err = MonitorConfig::load_from_path(&bad).unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
        assert!(format!("{err:#}").contains("brand name"));
    }

    #[test]
    fn load_from_path_rejects_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "brand: [unterminated
").unwrap();

        let err = MonitorConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid YAML in"));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn load_from_path_normalizes_like_from_yaml_str() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("monitor.yaml");
        fs::write(&path, FULL_CONFIG).unwrap();

        assert_eq!(
            MonitorConfig::load_from_path(&path).unwrap(),
            MonitorConfig::from_yaml_str(FULL_CONFIG).unwrap()
        );
    }
}
