//! Chat-completion provider seam and the OpenAI-compatible client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::config::{DEFAULT_BASE_URL, SummaryConfig};
use super::credential::ApiKey;
use crate::{PrecisError, Result};

/// Longest provider error body carried into [`PrecisError::Provider`]
const MAX_ERROR_BODY_CHARS: usize = 300;

/// One role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// "system", "user" or "assistant"
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into(), messages: Vec::new(), temperature: None }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Content of the first choice, if the provider sent any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatResponse {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    #[serde(default)]
    choices: Vec<ChoiceRaw>,
}

#[derive(Debug, Deserialize)]
struct ChoiceRaw {
    message: ChoiceMessageRaw,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessageRaw {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponseRaw {
    /// Keeps only the first choice's content
    fn into_response(self) -> ChatResponse {
        ChatResponse { content: self.choices.into_iter().next().and_then(|choice| choice.message.content) }
    }
}

/// A provider that turns a chat request into a response.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, key: &ApiKey, request: &ChatRequest) -> Result<ChatResponse>;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// A fresh HTTP client is built per call.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    timeout: Option<u64>,
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: None }
    }

    /// Client for the base URL and timeout of `config`.
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self { base_url: config.base_url.clone(), timeout: config.request_timeout }
    }

    /// Bounds each request to `seconds`.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, key: &ApiKey, request: &ChatRequest) -> Result<ChatResponse> {
        let start = Instant::now();

        let mut builder = Client::builder();
        if let Some(seconds) = self.timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| PrecisError::Provider(format!("failed to build client: {e}")))?;

        let response = client
            .post(self.endpoint())
            .bearer_auth(key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, model = %request.model, "chat completion request failed");
                PrecisError::Provider(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!(status = status.as_u16(), model = %request.model, "chat completion returned error status");
            return Err(PrecisError::Provider(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| PrecisError::Provider(format!("unreadable response body: {e}")))?;

        tracing::debug!(
            model = %request.model,
            choices = raw.choices.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "chat completion finished"
        );

        Ok(raw.into_response())
    }
}
