//! xAI chat completions client.

use crate::extraction::shape_output;
use async_trait::async_trait;
use derive_getters::Getters;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use wayfarer_core::{CompletionOutput, CompletionRequest};
use wayfarer_error::{CompletionError, CompletionErrorKind, ConfigError};
use wayfarer_interface::CompletionClient;

/// Base URL of xAI's OpenAI-compatible API.
pub const XAI_BASE_URL: &str = "https://api.x.ai/v1";

/// Model used when none is configured.
pub const XAI_DEFAULT_MODEL: &str = "grok-2";

/// Connection settings for the completion provider.
#[derive(Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder)]
#[setters(prefix = "with_", into)]
#[builder(default, setter(into))]
pub struct LlmConfig {
    /// API key, usually supplied through `XAI_API_KEY`
    #[serde(default, skip_serializing)]
    api_key: Option<String>,

    /// API base URL; requests go to `{base_url}/chat/completions`
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// Per-call timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_base_url() -> String {
    XAI_BASE_URL.to_string()
}

fn default_model() -> String {
    XAI_DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Start building a provider configuration.
    pub fn builder() -> LlmConfigBuilder {
        LlmConfigBuilder::default()
    }

    /// Whether a non-blank API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for xAI's chat completions endpoint.
///
/// Each `complete` call is one HTTP request. Transport and status failures are
/// normalized into [`CompletionErrorKind`]; retrying is left to the caller.
#[derive(Clone)]
pub struct XaiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl XaiClient {
    /// Creates a new xAI client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all, fields(model = %config.model(), base_url = %config.base_url()))]
    pub fn new(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key()
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::new("XAI_API_KEY is not set"))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url().trim_end_matches('/')),
            model: config.model().clone(),
            temperature: *config.temperature(),
        })
    }

    fn transport_error(error: reqwest::Error) -> CompletionError {
        if error.is_timeout() {
            return CompletionError::new(CompletionErrorKind::Timeout);
        }
        CompletionError::new(CompletionErrorKind::Upstream {
            status: error.status().map(|s| s.as_u16()),
            message: format!("Request failed: {}", error),
        })
    }

    async fn status_error(response: reqwest::Response) -> CompletionError {
        let status = response.status().as_u16();
        let retry_after = parse_retry_after_header(&response);
        let body = response.text().await.unwrap_or_default();

        if status == 429 && is_quota_exhausted(&body) {
            // xAI answers 429 when credits run out; waiting will not help
            warn!(status, "Quota exhausted");
            return CompletionError::new(CompletionErrorKind::Rejected {
                status,
                message: body,
            });
        }

        let kind = match CompletionErrorKind::from_status(status, body) {
            CompletionErrorKind::RateLimited { .. } => CompletionErrorKind::RateLimited { retry_after },
            kind => kind,
        };
        warn!(status, error = %kind, "Completion request failed");
        CompletionError::new(kind)
    }
}

impl std::fmt::Debug for XaiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XaiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl CompletionClient for XaiClient {
    #[instrument(skip(self, req), fields(provider = "xai", model = %self.model, shape = %req.shape()))]
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: req.system(),
                },
                ChatMessage {
                    role: "user",
                    content: req.prompt(),
                },
            ],
            temperature: req.temperature().unwrap_or(self.temperature),
            response_format: req.shape().is_json().then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(endpoint = %self.endpoint, "Sending chat completion request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let text = response.text().await.map_err(Self::transport_error)?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            CompletionError::malformed(format!("Failed to parse response envelope: {}", e))
        })?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::malformed("Response contained no message content"))?;

        debug!(content_length = content.len(), "Received completion");
        shape_output(&content, *req.shape())
    }

    fn provider_name(&self) -> &'static str {
        "xai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Numeric `Retry-After` header, in seconds.
fn parse_retry_after_header(response: &reqwest::Response) -> Option<Duration> {
    let value = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?;
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

fn is_quota_exhausted(body: &str) -> bool {
    let lower = body.to_lowercase();
    ["credits", "spending limit", "quota"]
        .iter()
        .any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = XaiClient::new(&LlmConfig::default()).unwrap_err();
        assert!(err.message.contains("XAI_API_KEY"));

        let blank = LlmConfig::default().with_api_key(Some("  ".to_string()));
        assert!(XaiClient::new(&blank).is_err());
    }

    #[test]
    fn endpoint_joins_base_url() {
        let config = LlmConfig::default()
            .with_api_key(Some("key".to_string()))
            .with_base_url("http://localhost:9000/v1/");
        let client = XaiClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = LlmConfig::default().with_api_key(Some("sk-secret".to_string()));
        assert!(!format!("{:?}", config).contains("sk-secret"));
        let client = XaiClient::new(&config).unwrap();
        assert!(!format!("{:?}", client).contains("sk-secret"));
    }

    #[test]
    fn quota_bodies_are_detected() {
        assert!(is_quota_exhausted(
            r#"{"error": "You have run out of credits"}"#
        ));
        assert!(!is_quota_exhausted(r#"{"error": "Too many requests"}"#));
    }

    #[test]
    fn config_defaults() {
        let config: LlmConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.model(), XAI_DEFAULT_MODEL);
        assert_eq!(config.base_url(), XAI_BASE_URL);
        assert!((*config.temperature() - 0.7).abs() < f32::EPSILON);
        assert!(!config.has_api_key());
    }
}
