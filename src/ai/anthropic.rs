//! Anthropic Messages API client for the Claude platform.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AiClient, AiClientMetadata, Platform, PlatformError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API request message.
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Messages API request body.
#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    system: String,
    messages: Vec<Message>,
}

/// Messages API response content block.
#[derive(Deserialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

/// Messages API response.
#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<Content>,
}

/// Claude client.
pub struct AnthropicClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Model identifier.
    model: String,
    /// Full messages URL.
    endpoint: String,
}

impl AnthropicClient {
    /// Creates a new Claude client.
    pub fn new(model: String, api_key: String, endpoint: String) -> Result<Self> {
        Ok(Self {
            client: super::build_http_client()?,
            api_key,
            model,
            endpoint,
        })
    }
}

impl AiClient for AnthropicClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let platform_name = Platform::Claude.display_name().to_string();

            debug!(
                system_prompt_len = system_prompt.len(),
                user_prompt_len = user_prompt.len(),
                model = %self.model,
                "Preparing Claude API request"
            );

            let request = MessagesRequest {
                model: self.model.clone(),
                max_tokens: super::MAX_RESPONSE_TOKENS,
                system: system_prompt.to_string(),
                messages: vec![Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                }],
            };

            info!(url = %self.endpoint, model = %self.model, "Sending request to Claude API");

            let response = self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| PlatformError::NetworkError {
                    platform: platform_name.clone(),
                    message: e.to_string(),
                })?;

            let response = super::check_error_response(Platform::Claude, response).await?;

            let messages_response: MessagesResponse =
                response
                    .json()
                    .await
                    .map_err(|e| PlatformError::InvalidResponseFormat {
                        platform: platform_name.clone(),
                        message: e.to_string(),
                    })?;

            debug!(
                content_count = messages_response.content.len(),
                "Received Claude API response"
            );

            // Claude can split an answer across several text blocks
            let text: Vec<&str> = messages_response
                .content
                .iter()
                .filter(|c| c.content_type == "text")
                .map(|c| c.text.as_str())
                .collect();

            let result = if text.is_empty() {
                Err(PlatformError::InvalidResponseFormat {
                    platform: platform_name,
                    message: "No text content in response".to_string(),
                }
                .into())
            } else {
                Ok(text.join(""))
            };

            super::log_response_success(Platform::Claude, &result);
            result
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            platform: Platform::Claude,
            model: self.model.clone(),
        }
    }
}
