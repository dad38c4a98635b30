use std::sync::Arc;

use precis_core::{API_KEY_ENV, DEFAULT_LANGUAGE, DEFAULT_MAX_WORDS, DEFAULT_MODEL, FetchConfig};
use serde::Serialize;

/// Languages offered by the form
pub const LANGUAGES: &[&str] = &["English", "Hindi", "Spanish", "French", "German"];

pub const MIN_WORDS: u32 = 50;
pub const MAX_WORDS: u32 = 500;
pub const WORDS_STEP: u32 = 25;

/// Read-only defaults shared by every request.
#[derive(Debug, Clone, Serialize)]
pub struct FormDefaults {
    pub languages: Vec<String>,
    pub default_language: String,
    pub min_words: u32,
    pub max_words: u32,
    pub words_step: u32,
    pub default_words: u32,
    pub default_model: String,
    /// Provider base URL. Not exposed to clients.
    #[serde(skip)]
    pub base_url: Option<String>,
    /// Environment variable holding the server-side fallback key. Not exposed to clients.
    #[serde(skip)]
    pub api_key_env: String,
    #[serde(skip)]
    pub fetch: FetchConfig,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            languages: LANGUAGES.iter().map(|l| l.to_string()).collect(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            min_words: MIN_WORDS,
            max_words: MAX_WORDS,
            words_step: WORDS_STEP,
            default_words: DEFAULT_MAX_WORDS,
            default_model: DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key_env: API_KEY_ENV.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Application state shared across handlers
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub defaults: Arc<FormDefaults>,
}

impl AppState {
    pub fn new(defaults: FormDefaults) -> Self {
        Self { defaults: Arc::new(defaults) }
    }
}
