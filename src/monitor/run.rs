//! Concurrent fan-out of monitoring prompts across platforms.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::ai::{AiClient, Platform};
use crate::analysis::{MentionAnalysis, MentionAnalyzer, NameMatcher, ScoringMode};
use crate::citations::extract_citations;
use crate::data::{MonitoringReport, NamedMention, ReportSubject, ResponseResult};

use super::prompts::{system_prompt, MonitorPrompt};

/// A brand monitoring run: every prompt sent to every platform.
#[derive(Debug, Clone)]
pub struct MonitoringRun {
    subject: ReportSubject,
    prompts: Vec<MonitorPrompt>,
    analyzer: MentionAnalyzer,
    brand_matcher: Option<NameMatcher>,
    competitor_matchers: Vec<Option<NameMatcher>>,
    quiet: bool,
}

impl MonitoringRun {
    /// Creates a run for `subject` with the given prompts and analyzer.
    ///
    /// Name patterns are compiled here once and reused for every answer.
    pub fn new(subject: ReportSubject, prompts: Vec<MonitorPrompt>, analyzer: MentionAnalyzer) -> Self {
        let brand_matcher = analyzer.matcher(&subject.brand);
        let competitor_matchers = subject
            .competitors
            .iter()
            .map(|name| analyzer.matcher(name))
            .collect();
        Self {
            subject,
            prompts,
            analyzer,
            brand_matcher,
            competitor_matchers,
            quiet: true,
        }
    }

    /// Enables or disables progress lines on stderr.
    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.quiet = !progress;
        self
    }

    /// Sends every prompt to every client and analyzes the answers.
    ///
    /// At most `concurrency` requests are in flight at once. A failed request
    /// is recorded on its result and never aborts the run. Results are
    /// ordered by platform, then by prompt.
    pub async fn execute(
        &self,
        clients: &[(Platform, Box<dyn AiClient>)],
        concurrency: usize,
    ) -> MonitoringReport {
        let total = clients.len() * self.prompts.len();
        let system = system_prompt(&self.subject.industry);

        info!(
            brand = %self.subject.brand,
            platforms = clients.len(),
            prompts = self.prompts.len(),
            concurrency,
            "Starting monitoring run"
        );

        let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
        let completed = Arc::new(AtomicUsize::new(0));

        let futs: Vec<_> = clients
            .iter()
            .flat_map(|(platform, client)| {
                self.prompts
                    .iter()
                    .map(move |prompt| (*platform, client.as_ref(), prompt))
            })
            .map(|(platform, client, prompt)| {
                let sem = semaphore.clone();
                let completed = completed.clone();
                let system = system.as_str();

                async move {
                    let model = client.get_metadata().model;
                    let mode = prompt.scoring_mode(self.analyzer.config().scoring_mode);

                    let outcome = match sem.acquire().await {
                        Ok(_permit) => client.send_request(system, &prompt.text).await,
                        Err(e) => Err(anyhow::anyhow!("semaphore closed: {e}")),
                    };

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    match outcome {
                        Ok(text) => {
                            if !self.quiet {
                                eprintln!("   ✅ {done}/{total} responses ({platform})");
                            }
                            self.analyze_response(platform, model, prompt, &text)
                        }
                        Err(e) => {
                            warn!(%platform, error = %e, "Platform request failed");
                            if !self.quiet {
                                eprintln!("   ❌ {done}/{total} responses ({platform} failed)");
                            }
                            ResponseResult::failed(
                                platform,
                                model,
                                prompt.text.clone(),
                                mode,
                                format!("{e:#}"),
                            )
                        }
                    }
                }
            })
            .collect();

        let mut responses = futures::future::join_all(futs).await;
        // join_all keeps submission order, so a stable sort keeps prompt order
        responses.sort_by_key(|r| r.platform);

        let report = MonitoringReport::new(self.subject.clone(), responses);
        info!(
            successful = report.summary.successful_responses,
            failed = report.summary.failed_responses,
            visibility = report.summary.brand.visibility,
            "Monitoring run complete"
        );
        report
    }

    /// Analyzes one answer for the brand, every competitor and its citations.
    pub fn analyze_response(
        &self,
        platform: Platform,
        model: String,
        prompt: &MonitorPrompt,
        text: &str,
    ) -> ResponseResult {
        let mode = prompt.scoring_mode(self.analyzer.config().scoring_mode);
        let brand = self.mention(text, self.brand_matcher.as_ref(), mode);
        let competitors = self
            .subject
            .competitors
            .iter()
            .zip(&self.competitor_matchers)
            .map(|(name, matcher)| NamedMention {
                name: name.clone(),
                analysis: self.mention(text, matcher.as_ref(), mode),
            })
            .collect();
        let citations = extract_citations(text);

        debug!(
            %platform,
            %mode,
            mentioned = brand.mentioned,
            prominence = brand.prominence_score,
            citations = citations.len(),
            "Analyzed platform response"
        );

        ResponseResult {
            platform,
            model,
            prompt: prompt.text.clone(),
            scoring_mode: mode,
            brand,
            competitors,
            citations,
            error: None,
        }
    }

    fn mention(
        &self,
        text: &str,
        matcher: Option<&NameMatcher>,
        mode: ScoringMode,
    ) -> MentionAnalysis {
        match matcher {
            Some(matcher) => self.analyzer.analyze_matched(text, matcher, mode),
            None => MentionAnalysis::not_mentioned(),
        }
    }
}
