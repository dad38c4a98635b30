//! LLM summarization of extracted text.
//!
//! A summary is one chat completion: resolve the credential, build a
//! two-message prompt, call the provider once, and return the trimmed answer.
//!
//! # Example
//!
//! ```rust,no_run
//! use precis_core::{SummaryConfig, extract_text, summarize};
//!
//! # async fn run() -> precis_core::Result<()> {
//! let text = extract_text("https://example.com/article").await?;
//! let config = SummaryConfig::builder().max_words(150).build()?;
//! let summary = summarize(&text.as_text(), &config).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod credential;
mod prompt;

pub use client::{ChatCompletion, ChatRequest, ChatResponse, Message, OpenAiClient};
pub use config::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_MAX_WORDS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    SummaryConfig, SummaryConfigBuilder,
};
pub use credential::{ApiKey, resolve_api_key, resolve_api_key_with};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT, PromptTemplate, SummaryRequest, build_chat_request};

use std::time::Instant;

use crate::{PrecisError, Result};

/// Summarizes text through a [`ChatCompletion`] provider.
pub struct Summarizer<C> {
    client: C,
}

impl<C: ChatCompletion> Summarizer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Summarizes `text` according to `config`.
    ///
    /// The credential is resolved before anything else, so a missing key
    /// never reaches the provider.
    ///
    /// # Errors
    ///
    /// - [`PrecisError::InvalidConfig`] if `config` fails validation
    /// - [`PrecisError::CredentialMissing`] if no API key is available
    /// - [`PrecisError::Provider`] from the provider call, unchanged
    /// - [`PrecisError::EmptyResponse`] if the answer is absent or blank
    pub async fn summarize(&self, text: &str, config: &SummaryConfig) -> Result<String> {
        config.validate()?;
        let key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;

        let request = build_chat_request(&SummaryRequest::new(text, config));
        let start = Instant::now();
        tracing::info!(
            model = %config.model,
            max_words = config.max_words,
            language = %config.language,
            chars = text.len(),
            "requesting summary"
        );

        let response = self.client.complete(&key, &request).await?;

        let summary = response
            .content
            .as_deref()
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .ok_or(PrecisError::EmptyResponse)?
            .to_string();

        tracing::info!(
            model = %config.model,
            words = summary.split_whitespace().count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "summary received"
        );

        Ok(summary)
    }
}

impl Default for Summarizer<OpenAiClient> {
    fn default() -> Self {
        Self::new(OpenAiClient::default())
    }
}

/// Summarizes `text` with an [`OpenAiClient`] built from `config`.
pub async fn summarize(text: &str, config: &SummaryConfig) -> Result<String> {
    Summarizer::new(OpenAiClient::from_config(config)).summarize(text, config).await
}
