//! Prompt wording and chat request assembly.

use super::client::{ChatRequest, Message};
use super::config::SummaryConfig;
use crate::{PrecisError, Result};

const LANGUAGE_PLACEHOLDER: &str = "{language}";
const MAX_WORDS_PLACEHOLDER: &str = "{max_words}";

/// Default system message.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You write short, accurate summaries.";

/// Default user instruction. The article text follows it after a blank line.
pub const DEFAULT_USER_PROMPT: &str = "Summarize this article in clear, concise bullet points in {language}, \
     keeping the summary under roughly {max_words} words.";

/// Prompt wording for a summary request.
///
/// The user template must mention both `{language}` and `{max_words}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    system: String,
    user: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self { system: DEFAULT_SYSTEM_PROMPT.to_string(), user: DEFAULT_USER_PROMPT.to_string() }
    }
}

impl PromptTemplate {
    /// Creates a template, rejecting a user template without both placeholders.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Result<Self> {
        let system = system.into();
        let user = user.into();

        for placeholder in [LANGUAGE_PLACEHOLDER, MAX_WORDS_PLACEHOLDER] {
            if !user.contains(placeholder) {
                return Err(PrecisError::InvalidConfig(format!("prompt template is missing {placeholder}")));
            }
        }

        Ok(Self { system, user })
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    /// Fills in the placeholders and appends the full `text`, never truncated.
    ///
    /// The template is scanned once, so substituted values are never read as
    /// placeholders themselves.
    pub fn render(&self, text: &str, max_words: u32, language: &str) -> String {
        let mut instruction = String::with_capacity(self.user.len() + language.len());
        let mut rest = self.user.as_str();

        while let Some(open) = rest.find('{') {
            instruction.push_str(&rest[..open]);
            let tail = &rest[open..];

            if let Some(after) = tail.strip_prefix(LANGUAGE_PLACEHOLDER) {
                instruction.push_str(language);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(MAX_WORDS_PLACEHOLDER) {
                instruction.push_str(&max_words.to_string());
                rest = after;
            } else {
                instruction.push('{');
                rest = &tail[1..];
            }
        }
        instruction.push_str(rest);

        format!("{instruction}\n\n{text}")
    }
}

/// Source text paired with the parameters to summarize it with.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub text: &'a str,
    pub config: &'a SummaryConfig,
}

impl<'a> SummaryRequest<'a> {
    pub fn new(text: &'a str, config: &'a SummaryConfig) -> Self {
        Self { text, config }
    }
}

/// Builds the two-message chat request for `request`.
pub fn build_chat_request(request: &SummaryRequest<'_>) -> ChatRequest {
    let config = request.config;

    ChatRequest::new(&config.model)
        .message(Message::system(config.prompt.system()))
        .message(Message::user(config.prompt.render(request.text, config.max_words, &config.language)))
        .temperature(config.temperature)
}
