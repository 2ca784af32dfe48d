//! Report data structures and serialization.

pub mod report;
pub mod yaml;

pub use report::{
    CitationSummary, DomainCount, MonitoringReport, NamedMention, OutputFormat, PlatformSummary,
    ReportSubject, ReportSummary, ResponseResult, SentimentBreakdown, VisibilitySummary,
};
pub use yaml::{from_yaml, read_yaml_file, to_yaml};
