//! Monitoring report types and aggregate visibility metrics.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ai::Platform;
use crate::analysis::{MentionAnalysis, ScoringMode, Sentiment};
use crate::citations::Citation;

/// Number of cited domains kept in [`CitationSummary::top_domains`].
const TOP_DOMAIN_LIMIT: usize = 10;

/// What a monitoring run was about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubject {
    /// Brand being tracked.
    pub brand: String,
    /// Brand website domain, used to recognise brand citations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Industry the prompts asked about.
    pub industry: String,
    /// Competitors tracked alongside the brand.
    pub competitors: Vec<String>,
}

/// Complete report for one monitoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringReport {
    /// What was monitored.
    pub subject: ReportSubject,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
    /// Per-response analysis, ordered by platform then prompt.
    pub responses: Vec<ResponseResult>,
    /// Aggregate metrics.
    pub summary: ReportSummary,
}

impl MonitoringReport {
    /// Creates a report and computes its summary.
    pub fn new(subject: ReportSubject, responses: Vec<ResponseResult>) -> Self {
        let summary = ReportSummary::from_results(&subject, &responses);
        Self {
            subject,
            generated_at: Utc::now(),
            responses,
            summary,
        }
    }

    /// Checks whether every platform request failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.responses.is_empty() && self.summary.successful_responses == 0
    }
}

/// A mention analysis labelled with the name it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMention {
    /// Brand or competitor name.
    pub name: String,
    /// Analysis of the response for this name.
    #[serde(flatten)]
    pub analysis: MentionAnalysis,
}

/// Analysis of one platform's answer to one prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResult {
    /// Platform that answered.
    pub platform: Platform,
    /// Model that answered.
    pub model: String,
    /// Prompt that was sent.
    pub prompt: String,
    /// Scoring policy applied to the answer.
    pub scoring_mode: ScoringMode,
    /// Brand analysis (zero analysis when the request failed).
    pub brand: MentionAnalysis,
    /// Competitor analyses, in configured order.
    pub competitors: Vec<NamedMention>,
    /// URLs cited in the answer.
    pub citations: Vec<Citation>,
    /// Why the request failed, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseResult {
    /// Builds the result for a request that produced no answer.
    pub fn failed(
        platform: Platform,
        model: String,
        prompt: String,
        scoring_mode: ScoringMode,
        error: String,
    ) -> Self {
        Self {
            platform,
            model,
            prompt,
            scoring_mode,
            brand: MentionAnalysis::not_mentioned(),
            competitors: Vec::new(),
            citations: Vec::new(),
            error: Some(error),
        }
    }

    /// Checks whether the platform answered.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Analysis for a competitor by name.
    pub fn competitor(&self, name: &str) -> Option<&MentionAnalysis> {
        self.competitors
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.analysis)
    }
}

/// Counts of mentions by sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    /// Positive mentions.
    pub positive: usize,
    /// Neutral mentions.
    pub neutral: usize,
    /// Negative mentions.
    pub negative: usize,
}

impl SentimentBreakdown {
    fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }
}

/// Aggregate visibility of one brand or competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilitySummary {
    /// Brand or competitor name.
    pub name: String,
    /// Successful responses considered.
    pub responses: usize,
    /// Responses mentioning the name.
    pub mentions: usize,
    /// Percentage of responses mentioning the name.
    pub visibility: u8,
    /// Mean position over mentions that have one.
    pub average_position: Option<f64>,
    /// Mean prominence over mentions.
    pub average_prominence: Option<f64>,
    /// Sentiment of mentions.
    pub sentiment: SentimentBreakdown,
    /// Percentage of all tracked mentions that belong to this name.
    pub share_of_voice: u8,
}

impl VisibilitySummary {
    /// Summarizes the analyses of one name across successful responses.
    pub fn from_analyses<'a, I>(name: &str, analyses: I, total_mentions: usize) -> Self
    where
        I: IntoIterator<Item = &'a MentionAnalysis>,
    {
        let mut responses = 0;
        let mut mentions = 0;
        let mut prominence_sum = 0u64;
        let mut positions = Vec::new();
        let mut sentiment = SentimentBreakdown::default();

        for analysis in analyses {
            responses += 1;
            if !analysis.mentioned {
                continue;
            }
            mentions += 1;
            prominence_sum += u64::from(analysis.prominence_score);
            sentiment.record(analysis.sentiment);
            if let Some(position) = analysis.position {
                positions.push(f64::from(position));
            }
        }

        Self {
            name: name.to_string(),
            responses,
            mentions,
            visibility: percent(mentions, responses),
            average_position: mean(&positions),
            average_prominence: (mentions > 0).then(|| prominence_sum as f64 / mentions as f64),
            sentiment,
            share_of_voice: percent(mentions, total_mentions),
        }
    }
}

/// Brand visibility on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    /// The platform.
    pub platform: Platform,
    /// Successful responses.
    pub responses: usize,
    /// Failed requests.
    pub errors: usize,
    /// Successful responses mentioning the brand.
    pub brand_mentions: usize,
    /// Percentage of successful responses mentioning the brand.
    pub brand_visibility: u8,
}

/// How often a domain was cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    /// Cited domain.
    pub domain: String,
    /// Number of citations.
    pub count: usize,
}

/// Citation metrics across successful responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationSummary {
    /// Total citations.
    pub total: usize,
    /// Citations pointing at the brand domain.
    pub brand_citations: usize,
    /// Most-cited domains, count descending then domain ascending.
    pub top_domains: Vec<DomainCount>,
}

impl CitationSummary {
    /// Aggregates citations, counting those that match `brand_domain`.
    pub fn from_citations<'a, I>(citations: I, brand_domain: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a Citation>,
    {
        let mut total = 0;
        let mut brand_citations = 0;
        let mut by_domain: HashMap<&str, usize> = HashMap::new();

        for citation in citations {
            total += 1;
            if brand_domain.is_some_and(|d| citation.matches_domain(d)) {
                brand_citations += 1;
            }
            *by_domain.entry(citation.domain.as_str()).or_insert(0) += 1;
        }

        let mut top_domains: Vec<DomainCount> = by_domain
            .into_iter()
            .map(|(domain, count)| DomainCount {
                domain: domain.to_string(),
                count,
            })
            .collect();
        top_domains.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
        top_domains.truncate(TOP_DOMAIN_LIMIT);

        Self {
            total,
            brand_citations,
            top_domains,
        }
    }
}

/// Aggregate metrics for a monitoring report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Requests that produced an answer.
    pub successful_responses: usize,
    /// Requests that failed.
    pub failed_responses: usize,
    /// Brand visibility.
    pub brand: VisibilitySummary,
    /// Competitor visibility, in configured order.
    pub competitors: Vec<VisibilitySummary>,
    /// Brand visibility per platform.
    pub platforms: Vec<PlatformSummary>,
    /// Citation metrics.
    pub citations: CitationSummary,
}

impl ReportSummary {
    /// Computes summary metrics from response results.
    ///
    /// Failed requests are counted but excluded from every rate.
    pub fn from_results(subject: &ReportSubject, results: &[ResponseResult]) -> Self {
        let successful: Vec<&ResponseResult> = results.iter().filter(|r| r.succeeded()).collect();
        let failed_responses = results.len() - successful.len();

        let brand_mentions = successful.iter().filter(|r| r.brand.mentioned).count();
        let competitor_mentions: usize = subject
            .competitors
            .iter()
            .map(|name| {
                successful
                    .iter()
                    .filter(|r| r.competitor(name).is_some_and(|a| a.mentioned))
                    .count()
            })
            .sum();
        let total_mentions = brand_mentions + competitor_mentions;

        let brand = VisibilitySummary::from_analyses(
            &subject.brand,
            successful.iter().map(|r| &r.brand),
            total_mentions,
        );

        let competitors = subject
            .competitors
            .iter()
            .map(|name| {
                VisibilitySummary::from_analyses(
                    name,
                    successful.iter().filter_map(|r| r.competitor(name)),
                    total_mentions,
                )
            })
            .collect();

        let mut per_platform: BTreeMap<Platform, PlatformSummary> = BTreeMap::new();
        for result in results {
            let entry = per_platform
                .entry(result.platform)
                .or_insert_with(|| PlatformSummary {
                    platform: result.platform,
                    responses: 0,
                    errors: 0,
                    brand_mentions: 0,
                    brand_visibility: 0,
                });
            if result.succeeded() {
                entry.responses += 1;
                if result.brand.mentioned {
                    entry.brand_mentions += 1;
                }
            } else {
                entry.errors += 1;
            }
        }
        let platforms = per_platform
            .into_values()
            .map(|mut summary| {
                summary.brand_visibility = percent(summary.brand_mentions, summary.responses);
                summary
            })
            .collect();

        let citations = CitationSummary::from_citations(
            successful.iter().flat_map(|r| r.citations.iter()),
            subject.domain.as_deref(),
        );

        Self {
            successful_responses: successful.len(),
            failed_responses,
            brand,
            competitors,
            platforms,
            citations,
        }
    }
}

/// Output format for reports and analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Rounded percentage, zero when the denominator is zero.
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().min(100.0) as u8
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::citations::extract_citations;

    fn subject() -> ReportSubject {
        ReportSubject {
            brand: "Acme".to_string(),
            domain: Some("acme.com".to_string()),
            industry: "widgets".to_string(),
            competitors: vec!["Globex".to_string(), "Initech".to_string()],
        }
    }

    fn answered(platform: Platform, text: &str) -> ResponseResult {
        ResponseResult {
            platform,
            model: "m".to_string(),
            prompt: "p".to_string(),
            scoring_mode: ScoringMode::Sentence,
            brand: analyze(text, "Acme"),
            competitors: ["Globex", "Initech"]
                .iter()
                .map(|name| NamedMention {
                    name: (*name).to_string(),
                    analysis: analyze(text, name),
                })
                .collect(),
            citations: extract_citations(text),
            error: None,
        }
    }

    fn failed(platform: Platform) -> ResponseResult {
        ResponseResult::failed(
            platform,
            "m".to_string(),
            "p".to_string(),
            ScoringMode::Sentence,
            "HTTP 500".to_string(),
        )
    }

    #[test]
    fn percent_rounds_and_handles_zero() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn summary_excludes_failures_from_rates() {
        let results = vec![
            answered(Platform::ChatGpt, "Acme is the best. Globex too."),
            answered(Platform::Claude, "Globex is great."),
            failed(Platform::Gemini),
        ];
        let summary = ReportSummary::from_results(&subject(), &results);

        assert_eq!(summary.successful_responses, 2);
        assert_eq!(summary.failed_responses, 1);
        assert_eq!(summary.brand.responses, 2);
        assert_eq!(summary.brand.mentions, 1);
        assert_eq!(summary.brand.visibility, 50);
        assert_eq!(summary.brand.average_position, Some(1.0));
        assert_eq!(summary.brand.average_prominence, Some(50.0));

        let globex = &summary.competitors[0];
        assert_eq!(globex.mentions, 2);
        assert_eq!(globex.visibility, 100);
        assert_eq!(globex.average_position, Some(1.5));

        let initech = &summary.competitors[1];
        assert_eq!(initech.mentions, 0);
        assert_eq!(initech.average_prominence, None);
        assert_eq!(initech.share_of_voice, 0);
    }

    #[test]
    fn share_of_voice_splits_all_mentions() {
        let results = vec![
            answered(Platform::ChatGpt, "Acme and Globex."),
            answered(Platform::Claude, "Acme and Initech."),
            answered(Platform::Grok, "Acme only."),
            answered(Platform::Gemini, "Globex only."),
        ];
        let summary = ReportSummary::from_results(&subject(), &results);
        // 3 brand + 2 Globex + 1 Initech = 6 mentions
        assert_eq!(summary.brand.share_of_voice, 50);
        assert_eq!(summary.competitors[0].share_of_voice, 33);
        assert_eq!(summary.competitors[1].share_of_voice, 17);
    }

    #[test]
    fn platform_summaries_follow_platform_order() {
        let results = vec![
            answered(Platform::Grok, "Acme rules."),
            failed(Platform::Grok),
            answered(Platform::ChatGpt, "Nothing here."),
        ];
        let summary = ReportSummary::from_results(&subject(), &results);
        let platforms: Vec<_> = summary.platforms.iter().map(|p| p.platform).collect();
        assert_eq!(platforms, vec![Platform::ChatGpt, Platform::Grok]);

        let grok = &summary.platforms[1];
        assert_eq!(grok.responses, 1);
        assert_eq!(grok.errors, 1);
        assert_eq!(grok.brand_visibility, 100);
        assert_eq!(summary.platforms[0].brand_visibility, 0);
    }

    #[test]
    fn sentiment_breakdown_counts_mentions_only() {
        let results = vec![
            answered(Platform::ChatGpt, "Acme is trusted, reliable and popular."),
            answered(Platform::Claude, "Try Acme. However, it is expensive and limited."),
            answered(Platform::Grok, "Acme exists."),
            answered(Platform::Gemini, "Nobody here."),
        ];
        let summary = ReportSummary::from_results(&subject(), &results);
        assert_eq!(
            summary.brand.sentiment,
            SentimentBreakdown {
                positive: 1,
                neutral: 1,
                negative: 1
            }
        );
    }

    #[test]
    fn citation_summary_counts_brand_domain() {
        let results = vec![
            answered(
                Platform::Perplexity,
                "Acme https://acme.com/a https://docs.acme.com/b https://globex.io",
            ),
            answered(Platform::ChatGpt, "See https://globex.io/pricing"),
        ];
        let summary = ReportSummary::from_results(&subject(), &results);
        assert_eq!(summary.citations.total, 4);
        assert_eq!(summary.citations.brand_citations, 2);
        assert_eq!(
            summary.citations.top_domains[0],
            DomainCount {
                domain: "globex.io".to_string(),
                count: 2
            }
        );
        assert_eq!(summary.citations.top_domains[1].domain, "acme.com");
    }

    #[test]
    fn citation_summary_without_brand_domain() {
        let citations = extract_citations("https://acme.com");
        let summary = CitationSummary::from_citations(citations.iter(), None);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.brand_citations, 0);
    }

    #[test]
    fn all_failed_report() {
        let report = MonitoringReport::new(subject(), vec![failed(Platform::Claude)]);
        assert!(report.all_failed());
        let empty = MonitoringReport::new(subject(), vec![]);
        assert!(!empty.all_failed());
    }

    #[test]
    fn named_mention_flattens_analysis() {
        let mention = NamedMention {
            name: "Globex".to_string(),
            analysis: analyze("Globex is great.", "Globex"),
        };
        let json = serde_json::to_value(&mention).unwrap();
        assert_eq!(json["name"], "Globex");
        assert_eq!(json["prominenceScore"], 50);
    }

    #[test]
    fn output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }
}
