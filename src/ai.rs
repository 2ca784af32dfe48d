//! AI platform clients used to collect responses for analysis.

pub mod anthropic;
pub mod error;
pub mod openai;
pub mod platform;
#[cfg(test)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

pub use anthropic::AnthropicClient;
pub use error::PlatformError;
pub use openai::OpenAiCompatibleClient;
pub use platform::{ApiFlavor, Platform};

use crate::utils::settings::Settings;

/// HTTP request timeout for platform calls.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Upper bound on response length requested from each platform.
pub(crate) const MAX_RESPONSE_TOKENS: u32 = 2048;

/// Metadata about an AI client implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiClientMetadata {
    /// Platform the client talks to.
    pub platform: Platform,
    /// Model identifier.
    pub model: String,
}

/// Trait for AI platform clients.
pub trait AiClient: Send + Sync {
    /// Sends a prompt to the platform and returns the raw text answer.
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

    /// Returns metadata about the client implementation.
    fn get_metadata(&self) -> AiClientMetadata;
}

/// Endpoint and model selection for a platform client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOverrides {
    /// Model to use instead of the platform default.
    pub model: Option<String>,
    /// Endpoint to use instead of the platform default.
    pub endpoint: Option<String>,
}

/// Creates a client for `platform`, resolving credentials from the
/// environment with fallback to the settings file.
///
/// Precedence for the model is: explicit override, `<PREFIX>_MODEL`, platform
/// default. The endpoint follows the same order with `<PREFIX>_BASE_URL`.
pub fn create_platform_client(
    platform: Platform,
    overrides: &ClientOverrides,
) -> Result<Box<dyn AiClient>> {
    create_platform_client_with_settings(&Settings::load_or_default(), platform, overrides)
}

/// Like [`create_platform_client`], resolving variables against `settings`.
pub fn create_platform_client_with_settings(
    settings: &Settings,
    platform: Platform,
    overrides: &ClientOverrides,
) -> Result<Box<dyn AiClient>> {
    let api_key = settings.get_env_vars(platform.api_key_vars()).ok_or_else(|| {
        PlatformError::ApiKeyNotFound {
            platform: platform.display_name().to_string(),
            vars: platform
                .api_key_vars()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    })?;

    let model = overrides
        .model
        .clone()
        .or_else(|| settings.get_env_var(&format!("{}_MODEL", platform.env_prefix())))
        .unwrap_or_else(|| platform.default_model().to_string());

    let endpoint = overrides
        .endpoint
        .clone()
        .or_else(|| settings.get_env_var(&format!("{}_BASE_URL", platform.env_prefix())))
        .unwrap_or_else(|| platform.default_endpoint().to_string());

    tracing::debug!(
        platform = platform.id(),
        model = %model,
        endpoint = %endpoint,
        "Creating platform client"
    );

    let client: Box<dyn AiClient> = match platform.flavor() {
        ApiFlavor::OpenAiCompatible => Box::new(OpenAiCompatibleClient::new(
            platform, model, api_key, endpoint,
        )?),
        ApiFlavor::AnthropicMessages => {
            Box::new(AnthropicClient::new(model, api_key, endpoint)?)
        }
    };

    Ok(client)
}

// ── Shared helpers for client implementations ───────────────────────

/// Builds an HTTP client with the standard request timeout.
pub(crate) fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Returns the response unchanged on success, or a
/// [`PlatformError::ApiRequestFailed`] carrying the status and body.
pub(crate) async fn check_error_response(
    platform: Platform,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_else(|e| {
        tracing::debug!("Failed to read error response body: {e}");
        String::new()
    });
    Err(PlatformError::ApiRequestFailed {
        platform: platform.display_name().to_string(),
        message: format!("HTTP {status}: {error_text}"),
    }
    .into())
}

/// Logs successful text extraction from a platform response.
pub(crate) fn log_response_success(platform: Platform, result: &Result<String>) {
    if let Ok(text) = result {
        tracing::debug!(
            platform = platform.id(),
            response_len = text.len(),
            "Extracted text content from platform response"
        );
        tracing::trace!(response_content = %text, "Platform response content");
    }
}
