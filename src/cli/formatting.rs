//! Human-readable rendering of analyses and reports.

use crate::analysis::{MentionAnalysis, ScoringMode};
use crate::data::{MonitoringReport, VisibilitySummary};

/// Renders a single mention analysis as text.
pub fn render_analysis(name: &str, mode: ScoringMode, analysis: &MentionAnalysis) -> String {
    let mut out = String::new();

    if !analysis.mentioned {
        out.push_str(&format!("{name}: not mentioned ({mode} scoring)\n"));
        return out;
    }

    let position = analysis
        .position
        .map_or_else(|| "-".to_string(), |p| p.to_string());

    out.push_str(&format!("{name}: mentioned ({mode} scoring)\n"));
    out.push_str(&format!("  Position:   {position}\n"));
    out.push_str(&format!("  Prominence: {}/100\n", analysis.prominence_score));
    out.push_str(&format!(
        "  Sentiment:  {} ({:+})\n",
        analysis.sentiment, analysis.sentiment_score
    ));
    out.push_str(&format!("  Context:    {}\n", one_line(&analysis.context)));
    out
}

/// Renders a monitoring report as text.
pub fn render_report(report: &MonitoringReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "📊 Visibility report for {} ({})\n",
        report.subject.brand, report.subject.industry
    ));
    out.push_str(&format!(
        "   Generated {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "   {} answered, {} failed\n",
        summary.successful_responses, summary.failed_responses
    ));

    out.push_str("\nVisibility\n");
    let width = std::iter::once(&summary.brand)
        .chain(&summary.competitors)
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);
    push_visibility_row(&mut out, &summary.brand, width, true);
    for competitor in &summary.competitors {
        push_visibility_row(&mut out, competitor, width, false);
    }

    if !summary.platforms.is_empty() {
        out.push_str("\nPlatforms\n");
        for platform in &summary.platforms {
            out.push_str(&format!(
                "   {:<10} {}% brand visibility ({}/{} answers)",
                platform.platform.display_name(),
                platform.brand_visibility,
                platform.brand_mentions,
                platform.responses
            ));
            if platform.errors > 0 {
                out.push_str(&format!(", {} failed", platform.errors));
            }
            out.push('\n');
        }
    }

    let citations = &summary.citations;
    if citations.total > 0 {
        out.push_str(&format!(
            "\nCitations: {} total, {} to the brand domain\n",
            citations.total, citations.brand_citations
        ));
        for domain in &citations.top_domains {
            out.push_str(&format!("   {} ({})\n", domain.domain, domain.count));
        }
    }

    let failures: Vec<_> = report.responses.iter().filter(|r| !r.succeeded()).collect();
    if !failures.is_empty() {
        out.push_str("\n⚠️  Failed requests\n");
        for failure in failures {
            out.push_str(&format!(
                "   {}: {}\n",
                failure.platform.display_name(),
                failure.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    out
}

fn push_visibility_row(out: &mut String, summary: &VisibilitySummary, width: usize, brand: bool) {
    let marker = if brand { "★" } else { " " };
    let position = summary
        .average_position
        .map_or_else(|| "-".to_string(), |p| format!("{p:.1}"));
    let prominence = summary
        .average_prominence
        .map_or_else(|| "-".to_string(), |p| format!("{p:.0}"));
    let sentiment = summary.sentiment;

    out.push_str(&format!(
        " {marker} {:<width$}  {:>3}% visible  {:>3}% share  position {position}  prominence {prominence}  sentiment +{}/={}/-{}\n",
        summary.name,
        summary.visibility,
        summary.share_of_voice,
        sentiment.positive,
        sentiment.neutral,
        sentiment.negative,
    ));
}

/// Collapses whitespace runs so a context fits on one line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
