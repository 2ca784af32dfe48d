//! Brand monitoring command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use crate::ai::{create_platform_client, AiClient, Platform};
use crate::config::MonitorConfig;
use crate::data::{to_yaml, MonitoringReport, OutputFormat};
use crate::monitor::MonitoringRun;
use crate::utils::check_platform_credentials;

use super::formatting::render_report;

/// Sends industry prompts to AI platforms and reports brand visibility.
#[derive(Parser)]
pub struct MonitorCommand {
    /// Monitoring configuration file (YAML).
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    /// Platforms to query, overriding the config (repeatable).
    #[arg(long = "platform", value_enum, value_name = "PLATFORM")]
    pub platforms: Vec<Platform>,

    /// Maximum concurrent platform requests, overriding the config.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Writes the report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Suppresses progress output.
    #[arg(long)]
    pub quiet: bool,
}

impl MonitorCommand {
    /// Executes the monitor command.
    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        check_platform_credentials(&config.platforms)?;

        let clients = config
            .platforms
            .iter()
            .map(|&platform| {
                create_platform_client(platform, &config.client_overrides(platform))
                    .map(|client| (platform, client))
                    .with_context(|| format!("Failed to create {platform} client"))
            })
            .collect::<Result<Vec<(Platform, Box<dyn AiClient>)>>>()?;

        let prompts = config.resolved_prompts();
        if !self.quiet {
            eprintln!(
                "🔄 Sending {} prompt(s) to {} platform(s) (concurrency: {})...",
                prompts.len(),
                clients.len(),
                config.concurrency
            );
        }

        let run = MonitoringRun::new(config.subject(), prompts, config.analyzer())
            .with_progress(!self.quiet);
        let report = run.execute(&clients, config.concurrency).await;

        let rendered = render(&report, self.format)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;
                info!(path = %path.display(), "Wrote monitoring report");
                if !self.quiet {
                    eprintln!("✅ Report written to {}", path.display());
                }
            }
            None => print!("{rendered}"),
        }

        if report.all_failed() {
            bail!(
                "All {} platform request(s) failed",
                report.summary.failed_responses
            );
        }
        Ok(())
    }

    /// Loads the config and applies command-line overrides.
    fn load_config(&self) -> Result<MonitorConfig> {
        let mut config = MonitorConfig::load_from_path(&self.config)?;

        if !self.platforms.is_empty() {
            let mut platforms = self.platforms.clone();
            platforms.sort();
            platforms.dedup();
            config.platforms = platforms;
        }
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                bail!("--concurrency must be at least 1");
            }
            config.concurrency = concurrency;
        }

        Ok(config)
    }
}

/// Renders a report in the requested format.
pub fn render(report: &MonitoringReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_report(report)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)
                .context("Failed to serialize report to JSON")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => {
            let mut yaml = to_yaml(report)?;
            yaml.push('\n');
            Ok(yaml)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::data::ReportSubject;

    const CONFIG: &str = "brand: { name: Acme }\nindustry: widgets\nplatforms: [grok]\n";

    fn command(dir: &TempDir, extra: &[&str]) -> MonitorCommand {
        let path = dir.path().join("monitor.yaml");
        fs::write(&path, CONFIG).unwrap();
        let mut argv = vec!["monitor", "--config", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        MonitorCommand::try_parse_from(argv).unwrap()
    }

    #[test]
    fn platform_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let cmd = command(
            &dir,
            &["--platform", "perplexity", "--platform", "chatgpt", "--platform", "chatgpt"],
        );
        let config = cmd.load_config().unwrap();
        assert_eq!(config.platforms, vec![Platform::ChatGpt, Platform::Perplexity]);
    }

    #[test]
    fn config_platforms_kept_without_flags() {
        let dir = TempDir::new().unwrap();
        let config = command(&dir, &[]).load_config().unwrap();
        assert_eq!(config.platforms, vec![Platform::Grok]);
    }

    #[test]
    fn concurrency_override() {
        let dir = TempDir::new().unwrap();
        let config = command(&dir, &["--concurrency", "9"]).load_config().unwrap();
        assert_eq!(config.concurrency, 9);

        let err = command(&dir, &["--concurrency", "0"])
            .load_config()
            .unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn renders_json_report() {
        let subject = ReportSubject {
            brand: "Acme".to_string(),
            domain: None,
            industry: "widgets".to_string(),
            competitors: vec![],
        };
        let report = MonitoringReport::new(subject, vec![]);
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["subject"]["brand"], "Acme");
        assert_eq!(value["summary"]["brand"]["visibility"], 0);
        assert!(value["generatedAt"].is_string());
    }
}
