//! OpenAI-compatible chat completions client (ChatGPT, Perplexity, Gemini, Grok).

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AiClient, AiClientMetadata, Platform, PlatformError};

/// Chat completions request message.
#[derive(Serialize, Debug)]
struct Message {
    role: String,
    content: String,
}

/// Chat completions request body.
#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// Chat completions response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// Chat completions response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat completions response.
#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    /// Perplexity returns its sources alongside the answer.
    #[serde(default)]
    citations: Vec<String>,
}

/// Client for any platform exposing an OpenAI-compatible chat completions API.
pub struct OpenAiCompatibleClient {
    /// HTTP client for API requests.
    client: Client,
    /// Platform this client reports as.
    platform: Platform,
    /// Model identifier.
    model: String,
    /// Bearer token.
    api_key: String,
    /// Full chat completions URL.
    endpoint: String,
    /// Sampling temperature.
    temperature: Option<f32>,
}

impl OpenAiCompatibleClient {
    /// Creates a client for `platform` posting to `endpoint`.
    pub fn new(platform: Platform, model: String, api_key: String, endpoint: String) -> Result<Self> {
        Ok(Self {
            client: super::build_http_client()?,
            platform,
            model,
            api_key,
            endpoint,
            temperature: Some(0.2),
        })
    }

    /// Builds the request body for one prompt.
    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> ChatRequest {
        let mut messages = Vec::new();

        if !system_prompt.is_empty() {
            messages.push(Message {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            });
        }

        messages.push(Message {
            role: "user".to_string(),
            content: user_prompt.to_string(),
        });

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: super::MAX_RESPONSE_TOKENS,
            temperature: self.temperature,
            stream: false,
        }
    }
}

/// Appends out-of-band source URLs so citation extraction sees them.
fn append_citations(mut text: String, citations: &[String]) -> String {
    if citations.is_empty() {
        return text;
    }
    text.push_str("\n\nSources:\n");
    for (i, url) in citations.iter().enumerate() {
        text.push_str(&format!("[{}] {url}\n", i + 1));
    }
    text
}

impl AiClient for OpenAiCompatibleClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let platform_name = self.platform.display_name().to_string();
            let request = self.build_request(system_prompt, user_prompt);

            debug!(
                platform = self.platform.id(),
                message_count = request.messages.len(),
                max_tokens = request.max_tokens,
                temperature = ?request.temperature,
                "Built chat completions request"
            );
            info!(url = %self.endpoint, model = %self.model, platform = self.platform.id(), "Sending chat completions request");

            let response = self
                .client
                .post(&self.endpoint)
                .header("Content-Type", "application/json")
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| PlatformError::NetworkError {
                    platform: platform_name.clone(),
                    message: e.to_string(),
                })?;

            let response = super::check_error_response(self.platform, response).await?;

            let chat_response: ChatResponse =
                response
                    .json()
                    .await
                    .map_err(|e| PlatformError::InvalidResponseFormat {
                        platform: platform_name.clone(),
                        message: e.to_string(),
                    })?;

            debug!(
                choice_count = chat_response.choices.len(),
                model = ?chat_response.model,
                citation_count = chat_response.citations.len(),
                "Received chat completions response"
            );

            let result = chat_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .map(|text| append_citations(text, &chat_response.citations))
                .ok_or_else(|| {
                    PlatformError::InvalidResponseFormat {
                        platform: platform_name,
                        message: "No message content in response".to_string(),
                    }
                    .into()
                });

            super::log_response_success(self.platform, &result);
            result
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            platform: self.platform,
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, platform: Platform) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(
            platform,
            "test-model".to_string(),
            "sk-test".to_string(),
            format!("{}/v1/chat/completions", server.uri()),
        )
        .unwrap()
    }

    #[test]
    fn build_request_skips_empty_system_prompt() {
        let client = OpenAiCompatibleClient::new(
            Platform::ChatGpt,
            "gpt-4o".to_string(),
            "sk".to_string(),
            "http://localhost".to_string(),
        )
        .unwrap();
        assert_eq!(client.build_request("", "hi").messages.len(), 1);
        let request = client.build_request("sys", "hi");
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "hi");
    }

    #[test]
    fn append_citations_numbers_sources() {
        let text = append_citations(
            "Acme leads.".to_string(),
            &["https://acme.com".to_string(), "https://globex.io".to_string()],
        );
        assert!(text.ends_with("[1] https://acme.com\n[2] https://globex.io\n"));
        assert_eq!(append_citations("x".to_string(), &[]), "x");
    }

    #[tokio::test]
    async fn send_request_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_partial_json(json!({"model": "test-model", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "test-model",
                "choices": [{"message": {"role": "assistant", "content": "1. Acme\n2. Globex"}}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Platform::ChatGpt);
        let text = client.send_request("sys", "rank tools").await.unwrap();
        assert_eq!(text, "1. Acme\n2. Globex");
    }

    #[tokio::test]
    async fn send_request_appends_perplexity_citations() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Acme is popular."}}],
                "citations": ["https://acme.com/blog"]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Platform::Perplexity);
        let text = client.send_request("", "q").await.unwrap();
        assert!(text.starts_with("Acme is popular."));
        assert!(text.contains("[1] https://acme.com/blog"));
    }

    #[tokio::test]
    async fn send_request_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = client_for(&server, Platform::Grok);
        let err = client.send_request("", "q").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Grok"), "{message}");
        assert!(message.contains("429"), "{message}");
        assert!(message.contains("slow down"), "{message}");
    }

    #[tokio::test]
    async fn send_request_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, Platform::Gemini);
        let err = client.send_request("", "q").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlatformError>(),
            Some(PlatformError::InvalidResponseFormat { .. })
        ));
    }
}
