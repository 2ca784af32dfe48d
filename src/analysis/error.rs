//! Analyzer error handling.

use thiserror::Error;

/// Errors raised at the analyzer boundary.
///
/// The analyzer itself never fails on string input. These errors surface from
/// request validation and from compiling the name pattern.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The caller passed an argument the analyzer cannot meaningfully use.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The case-insensitive pattern for a name could not be compiled.
    #[error("Failed to build match pattern for {name:?}")]
    InvalidPattern {
        /// The name that produced the pattern.
        name: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}
