//! Error types for Précis operations.
//!
//! This module defines the main error type [`PrecisError`] which represents
//! every failure the extraction and summarization pipeline can surface, and
//! [`ErrorKind`], the coarse taxonomy shells match on to pick a message.
//!
//! # Example
//!
//! ```rust
//! use precis_core::{ErrorKind, PrecisError};
//!
//! fn describe(err: &PrecisError) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::ContentNotFound => "The page loaded but had no readable article text.",
//!         ErrorKind::CredentialMissing => "Provide an API key.",
//!         _ => "Something went wrong.",
//!     }
//! }
//!
//! assert_eq!(describe(&PrecisError::ContentNotFound), "The page loaded but had no readable article text.");
//! ```

use thiserror::Error;

/// Main error type for extraction and summarization.
///
/// Variants are grouped by [`ErrorKind`]. The core never retries and never
/// renders these for a particular UI; the `Display` output is a plain
/// diagnostic suitable for logs.
#[derive(Error, Debug)]
pub enum PrecisError {
    /// Invalid URL provided.
    ///
    /// Returned before any I/O when the URL cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network errors from reqwest while fetching a page.
    ///
    /// This variant wraps DNS failures, refused connections, TLS problems
    /// and body read failures.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when fetching a page exceeds the configured timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The page answered with a non-success status.
    #[error("HTTP {status} returned by {url}")]
    HttpStatus { status: u16, url: String },

    /// The page loaded but no paragraph text survived extraction.
    #[error("No readable text found at this URL")]
    ContentNotFound,

    /// HTML parsing errors, in practice invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Neither an explicit credential nor the fallback environment variable
    /// yielded a non-empty API key.
    #[error("API key is missing (pass one explicitly or set {var})")]
    CredentialMissing { var: String },

    /// The chat-completion provider failed: transport error, non-success
    /// status or an unreadable body.
    #[error("LLM provider error: {0}")]
    Provider(String),

    /// The provider answered successfully but without usable content.
    #[error("LLM provider returned an empty response")]
    EmptyResponse,

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`PrecisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network, DNS, timeout or malformed URL while fetching.
    Transport,
    /// The fetched page returned a non-2xx status.
    Http,
    /// Extraction produced no paragraphs.
    ContentNotFound,
    /// No credential available for the LLM call.
    CredentialMissing,
    /// The LLM call failed.
    Provider,
    /// The LLM call succeeded without usable content.
    EmptyResponse,
    /// Invalid parameters or internal parser configuration.
    Config,
}

impl ErrorKind {
    /// Stable snake_case label, used in logs and JSON error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport_error",
            ErrorKind::Http => "http_error",
            ErrorKind::ContentNotFound => "content_not_found",
            ErrorKind::CredentialMissing => "credential_missing",
            ErrorKind::Provider => "provider_error",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::Config => "invalid_config",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PrecisError {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrecisError::InvalidUrl(_) | PrecisError::Transport(_) | PrecisError::Timeout { .. } => {
                ErrorKind::Transport
            }
            PrecisError::HttpStatus { .. } => ErrorKind::Http,
            PrecisError::ContentNotFound => ErrorKind::ContentNotFound,
            PrecisError::CredentialMissing { .. } => ErrorKind::CredentialMissing,
            PrecisError::Provider(_) => ErrorKind::Provider,
            PrecisError::EmptyResponse => ErrorKind::EmptyResponse,
            PrecisError::HtmlParseError(_) | PrecisError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for PrecisError.
pub type Result<T> = std::result::Result<T, PrecisError>;
