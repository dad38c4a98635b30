//! Summary parameters, their defaults and validation.

use std::fmt;

use url::Url;

use super::prompt::PromptTemplate;
use crate::{PrecisError, Result};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default word budget for a summary.
pub const DEFAULT_MAX_WORDS: u32 = 200;

/// Default summary language.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Environment variable consulted when no explicit API key is given.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Parameters for one summarization call.
///
/// `max_words` and `language` are passed to the model as instructions and are
/// not enforced on the output.
///
/// # Example
///
/// ```rust
/// use precis_core::SummaryConfig;
///
/// let config = SummaryConfig::builder()
///     .max_words(120)
///     .language("French")
///     .build()
///     .unwrap();
/// assert_eq!(config.model, "gpt-4o-mini");
/// assert_eq!(config.max_words, 120);
///
/// assert!(SummaryConfig::builder().max_words(0).build().is_err());
/// ```
#[derive(Clone)]
pub struct SummaryConfig {
    /// Chat model identifier (default: `gpt-4o-mini`).
    pub model: String,

    /// Advisory word budget (default: 200).
    pub max_words: u32,

    /// Language the summary should be written in (default: `English`).
    pub language: String,

    /// Sampling temperature, 0.0 to 2.0 (default: 0.4).
    pub temperature: f32,

    /// System and user prompt wording.
    pub prompt: PromptTemplate,

    /// Explicit API key; takes precedence over the environment.
    pub api_key: Option<String>,

    /// Environment variable read when `api_key` is absent (default: `OPENAI_API_KEY`).
    pub api_key_env: String,

    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Timeout for the completion request in seconds. `None` uses the HTTP client default.
    pub request_timeout: Option<u64>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_words: DEFAULT_MAX_WORDS,
            language: DEFAULT_LANGUAGE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            prompt: PromptTemplate::default(),
            api_key: None,
            api_key_env: API_KEY_ENV.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("model", &self.model)
            .field("max_words", &self.max_words)
            .field("language", &self.language)
            .field("temperature", &self.temperature)
            .field("prompt", &self.prompt)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl SummaryConfig {
    /// Creates a new builder for SummaryConfig.
    pub fn builder() -> SummaryConfigBuilder {
        SummaryConfigBuilder::new()
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(PrecisError::InvalidConfig("max_words must be a positive integer".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(PrecisError::InvalidConfig(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.model.trim().is_empty() {
            return Err(PrecisError::InvalidConfig("model must not be blank".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(PrecisError::InvalidConfig("language must not be blank".to_string()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(PrecisError::InvalidConfig("api_key_env must not be blank".to_string()));
        }
        Url::parse(&self.base_url)
            .map_err(|e| PrecisError::InvalidConfig(format!("base_url {:?} is not a valid URL: {}", self.base_url, e)))?;
        Ok(())
    }
}

/// Builder for SummaryConfig.
pub struct SummaryConfigBuilder {
    config: SummaryConfig,
}

impl SummaryConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SummaryConfig::default() }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_words(mut self, value: u32) -> Self {
        self.config.max_words = value;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.config.temperature = value;
        self
    }

    pub fn prompt(mut self, prompt: PromptTemplate) -> Self {
        self.config.prompt = prompt;
        self
    }

    /// Sets the explicit API key. Blank keys count as absent when resolving.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Sets the environment variable used as the credential fallback.
    pub fn api_key_env(mut self, var: impl Into<String>) -> Self {
        self.config.api_key_env = var.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the completion request timeout in seconds.
    pub fn request_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout = Some(seconds);
        self
    }

    /// Validates and builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisError::InvalidConfig`] naming the offending field.
    pub fn build(self) -> Result<SummaryConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SummaryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_summary_config_default() {
        let config = SummaryConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_words, 200);
        assert_eq!(config.language, "English");
        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.api_key.is_none());
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_summary_config_builder() {
        let config = SummaryConfig::builder()
            .model("gpt-4o")
            .max_words(350)
            .language("Spanish")
            .temperature(0.0)
            .api_key("sk-test")
            .api_key_env("MY_KEY")
            .base_url("http://127.0.0.1:8080/v1")
            .request_timeout(30)
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_words, 350);
        assert_eq!(config.language, "Spanish");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_key_env, "MY_KEY");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/v1");
        assert_eq!(config.request_timeout, Some(30));
    }

    #[rstest]
    #[case::zero_words(SummaryConfig::builder().max_words(0), "max_words")]
    #[case::hot_temperature(SummaryConfig::builder().temperature(2.5), "temperature")]
    #[case::negative_temperature(SummaryConfig::builder().temperature(-0.1), "temperature")]
    #[case::blank_model(SummaryConfig::builder().model("  "), "model")]
    #[case::blank_language(SummaryConfig::builder().language(""), "language")]
    #[case::bad_base_url(SummaryConfig::builder().base_url("not a url"), "base_url")]
    fn test_summary_config_rejects(#[case] builder: SummaryConfigBuilder, #[case] field: &str) {
        match builder.build() {
            Err(PrecisError::InvalidConfig(message)) => assert!(message.contains(field), "{message}"),
            other => panic!("expected InvalidConfig for {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = SummaryConfig::builder().api_key("sk-very-secret").build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
