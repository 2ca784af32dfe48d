//! # revintel
//!
//! Brand visibility monitoring for AI assistant answers.
//!
//! `revintel` asks AI platforms (ChatGPT, Claude, Perplexity, Gemini, Grok)
//! questions about an industry and measures how often, how prominently and
//! how favourably a brand is mentioned compared with its competitors.
//!
//! ## Quick Start
//!
//! ```rust
//! use revintel::analyze;
//!
//! let analysis = analyze("Acme is the best choice. Competitors are fine too.", "Acme");
//! assert!(analysis.mentioned);
//! assert_eq!(analysis.position, Some(1));
//! assert_eq!(analysis.prominence_score, 50);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod analysis;
pub mod citations;
pub mod cli;
pub mod config;
pub mod data;
pub mod monitor;
pub mod utils;

pub use crate::analysis::{analyze, analyze_with_mode, MentionAnalysis, MentionAnalyzer};
pub use crate::cli::Cli;

/// The current version of revintel.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
