//! OpenAI-compatible chat-completion backend.
//!
//! Issues one `POST /v1/chat/completions` per request against any endpoint
//! speaking the OpenAI wire format. Connection pooling and TLS are delegated
//! to the underlying reqwest client; this module owns only the request shape,
//! the response decode, and the error mapping.

use crate::backend::{LlmBackend, LlmMessage, LlmRequest, LlmResponse, TokenUsage};
use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL of the API, without the `/v1/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier submitted with every request.
    pub model: String,
    /// API key, sent as a bearer token when set.
    pub api_key: Option<String>,
    /// Timeout applied to each outbound request.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a configuration with the default 30 second timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Chat-completion client for OpenAI-compatible providers.
pub struct OpenAiBackend {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiBackend {
    /// Creates a backend from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfig`] if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                reason: e.to_string(),
            })?;
        Ok(Self { http, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: request.messages(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut outbound = self.http.post(self.completions_url()).json(&body);
        if let Some(ref api_key) = self.config.api_key {
            outbound = outbound.bearer_auth(api_key);
        }

        let response = outbound.send().await.map_err(map_send_error)?;

        let response = response.error_for_status().map_err(|e| {
            LlmError::RequestFailed {
                reason: e
                    .status()
                    .map_or_else(|| e.to_string(), |s| format!("provider returned {s}")),
            }
        })?;

        let completion: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| LlmError::ResponseParseFailed {
                    reason: e.to_string(),
                })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        let usage = completion
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        tracing::debug!(
            model = %completion.model,
            prompt_tokens = usage.prompt_tokens,
            total_tokens = usage.total(),
            has_content = content.is_some(),
            "chat completion finished"
        );

        Ok(LlmResponse {
            content,
            usage,
            model: completion.model,
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

fn map_send_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else if e.is_connect() {
        LlmError::ProviderUnavailable {
            provider: "openai".to_string(),
            reason: e.to_string(),
        }
    } else {
        LlmError::RequestFailed {
            reason: e.to_string(),
        }
    }
}

/// Wire request for `/v1/chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<LlmMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Wire response from `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn backend_for(server: &MockServer) -> OpenAiBackend {
        OpenAiBackend::new(
            OpenAiConfig::new(server.base_url(), "gpt-4o-mini").with_api_key("test-key"),
        )
        .expect("build backend")
    }

    #[tokio::test]
    async fn submits_message_pair_and_decodes_content() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(
                    r#"{
                        "model": "gpt-4o-mini",
                        "messages": [
                            {"role": "system", "content": "You are a music expert."},
                            {"role": "user", "content": "What was the top single?"}
                        ]
                    }"#,
                );
            then.status(200).json_body(serde_json::json!({
                "model": "gpt-4o-mini",
                "choices": [
                    {"message": {"role": "assistant", "content": "When Doves Cry"}}
                ],
                "usage": {"prompt_tokens": 25, "completion_tokens": 6, "total_tokens": 31}
            }));
        });

        let request =
            LlmRequest::new("What was the top single?").with_system("You are a music expert.");
        let response = backend_for(&server)
            .complete(&request)
            .await
            .expect("completion succeeds");

        mock.assert();
        assert_eq!(response.text().expect("has content"), "When Doves Cry");
        assert_eq!(response.usage.prompt_tokens, 25);
        assert_eq!(response.usage.total(), 31);
        assert_eq!(response.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn contentless_choice_surfaces_as_empty_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "model": "gpt-4o-mini",
                "choices": [{"message": {"role": "assistant"}}]
            }));
        });

        let response = backend_for(&server)
            .complete(&LlmRequest::new("anything"))
            .await
            .expect("transport succeeds");

        assert_eq!(response.content, None);
        assert_eq!(response.text(), Err(LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn provider_error_maps_to_request_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(500);
        });

        let err = backend_for(&server)
            .complete(&LlmRequest::new("anything"))
            .await
            .expect_err("500 is an error");

        assert!(matches!(err, LlmError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_parse_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("not json");
        });

        let err = backend_for(&server)
            .complete(&LlmRequest::new("anything"))
            .await
            .expect_err("garbage body is an error");

        assert!(matches!(err, LlmError::ResponseParseFailed { .. }));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let backend =
            OpenAiBackend::new(OpenAiConfig::new("http://localhost:11434/", "llama3"))
                .expect("build backend");
        assert_eq!(
            backend.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
