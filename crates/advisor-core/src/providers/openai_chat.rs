//! OpenAI-compatible Chat Completions client (non-streaming).
//!
//! Works against the OpenAI API directly or any proxy that speaks the same
//! `/chat/completions` schema.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::providers::shared::{USER_AGENT, resolve_api_key, resolve_base_url};
use crate::providers::{AssistantBackend, ChatMessage, ProviderError, ProviderResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// OpenAI chat completions configuration.
#[derive(Debug, Clone)]
pub struct OpenAIChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
}

impl OpenAIChatConfig {
    /// Creates a config from file values and the environment.
    ///
    /// Environment variables:
    /// - `OPENAI_API_KEY` (fallback if not in config)
    /// - `OPENAI_BASE_URL` (overrides config)
    pub fn from_env(
        model: String,
        max_tokens: Option<u32>,
        config_base_url: Option<&str>,
        config_api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(config_api_key, "OPENAI_API_KEY", "openai")?;
        let base_url =
            resolve_base_url(config_base_url, "OPENAI_BASE_URL", DEFAULT_BASE_URL, "OpenAI")?;

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout,
        })
    }
}

/// OpenAI chat completions client.
pub struct OpenAIChatClient {
    config: OpenAIChatConfig,
    http: reqwest::Client,
}

impl OpenAIChatClient {
    pub fn new(config: OpenAIChatConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl AssistantBackend for OpenAIChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> ProviderResult<Option<String>> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
        };
        let url = format!("{}{}", self.config.base_url, CHAT_COMPLETIONS_PATH);

        tracing::debug!(%url, messages = messages.len(), "sending chat completion");

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat completion failed");
            return Err(ProviderError::http_status(status.as_u16(), &body));
        }

        Ok(extract_reply(&body))
    }
}

/// Pulls `choices[0].message.content` out of a success body.
///
/// Anything unexpected (invalid JSON, no choices, null or blank content)
/// yields `None`.
fn extract_reply(body: &str) -> Option<String> {
    let parsed: ChatCompletionResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable chat completion body");
            return None;
        }
    };

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers
}

fn classify_reqwest_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ProviderError::network(format!("Connection failed: {e}"))
    } else {
        ProviderError::network(format!("Network error: {e}"))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::providers::ProviderErrorKind;

    fn client_for(server: &MockServer) -> OpenAIChatClient {
        OpenAIChatClient::new(OpenAIChatConfig {
            api_key: "test-key".to_string(),
            base_url: format!("{}/v1", server.uri()),
            model: "gpt-test".to_string(),
            max_tokens: Some(256),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    fn completion(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": text }, "finish_reason": "stop" }
            ]
        })
    }

    #[tokio::test]
    async fn test_complete_returns_reply_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-test",
                "max_tokens": 256,
                "messages": [{ "role": "user", "content": "hi" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hello!")))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("Hello!"));
    }

    #[tokio::test]
    async fn test_missing_reply_field_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid API key", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 401: Invalid API key");
    }

    #[test]
    fn test_extract_reply_tolerates_garbage() {
        assert_eq!(extract_reply("not json"), None);
        assert_eq!(extract_reply(r#"{"choices":[{"message":{"content":null}}]}"#), None);
        assert_eq!(extract_reply(r#"{"choices":[{"message":{"content":"  "}}]}"#), None);
        assert_eq!(
            extract_reply(r#"{"choices":[{"message":{"content":"ok"}}]}"#).as_deref(),
            Some("ok")
        );
    }
}
