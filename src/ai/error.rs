//! Platform client error handling.

use thiserror::Error;

/// Errors talking to an AI chat platform.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// No API key was found for the platform.
    #[error("{platform} API key not found. Set one of: {}", vars.join(", "))]
    ApiKeyNotFound {
        /// Display name of the platform.
        platform: String,
        /// Environment variables that were checked.
        vars: Vec<String>,
    },

    /// The platform answered with a non-success status.
    #[error("{platform} API request failed: {message}")]
    ApiRequestFailed {
        /// Display name of the platform.
        platform: String,
        /// Status line and response body.
        message: String,
    },

    /// The platform answered with a body we could not interpret.
    #[error("Invalid response format from {platform} API: {message}")]
    InvalidResponseFormat {
        /// Display name of the platform.
        platform: String,
        /// What was wrong with the body.
        message: String,
    },

    /// The request never produced a response.
    #[error("Network error contacting {platform}: {message}")]
    NetworkError {
        /// Display name of the platform.
        platform: String,
        /// Transport error description.
        message: String,
    },
}
