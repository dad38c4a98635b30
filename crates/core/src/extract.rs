//! Plain-text extraction: fetch, readability, then paragraphs.
//!
//! # Example
//!
//! ```rust
//! use precis_core::ContentExtractor;
//!
//! let html = r#"<html><body><article>
//!     <p>The first paragraph of the story, with enough text to be scored.</p>
//!     <p>The second paragraph continues the story, adding detail and commas.</p>
//! </article></body></html>"#;
//!
//! let text = ContentExtractor::new().extract_html(html).unwrap();
//! assert_eq!(text.paragraph_count(), 2);
//! assert!(text.as_text().contains("\n\n"));
//! ```

use std::fmt;
use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;

use crate::fetch::{FetchConfig, fetch_url};
use crate::parse::Document;
use crate::readability::{Readability, ReadabilityConfig};
use crate::{PrecisError, Result};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Article text as an ordered list of non-empty paragraphs.
///
/// Never empty: a page with nothing readable is a [`PrecisError::ContentNotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    paragraphs: Vec<String>,
}

impl ExtractedText {
    /// Wraps a paragraph list, rejecting an empty one.
    pub fn from_paragraphs(paragraphs: Vec<String>) -> Result<Self> {
        if paragraphs.is_empty() {
            return Err(PrecisError::ContentNotFound);
        }
        Ok(Self { paragraphs })
    }

    /// Paragraphs joined by a blank line.
    pub fn as_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whitespace-separated word count across all paragraphs.
    pub fn word_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.split_whitespace().count()).sum()
    }

    pub fn into_paragraphs(self) -> Vec<String> {
        self.paragraphs
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Text of every `<p>` in the fragment, in document order.
///
/// Inline descendants contribute their text. Inner whitespace runs collapse
/// to one space and paragraphs that end up empty are dropped.
pub fn paragraphs_from_html(fragment: &str) -> Result<Vec<String>> {
    let doc = Document::parse_fragment(fragment)?;

    Ok(doc
        .select("p")?
        .iter()
        .map(|p| WHITESPACE.replace_all(&p.text(), " ").trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

/// Fetches pages and reduces them to [`ExtractedText`].
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    fetch: FetchConfig,
    readability: ReadabilityConfig,
}

impl ContentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(fetch: FetchConfig, readability: ReadabilityConfig) -> Self {
        Self { fetch, readability }
    }

    pub fn fetch_config(&self) -> &FetchConfig {
        &self.fetch
    }

    /// Fetches `url` and extracts its article text.
    ///
    /// # Errors
    ///
    /// Transport and status failures from [`fetch_url`], or
    /// [`PrecisError::ContentNotFound`] when the page has no readable paragraphs.
    pub async fn extract(&self, url: &str) -> Result<ExtractedText> {
        let start = Instant::now();
        let document = fetch_url(url, &self.fetch).await?;
        let text = self.extract_html(&document.html)?;

        tracing::info!(
            url = %document.url,
            paragraphs = text.paragraph_count(),
            words = text.word_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "article extracted"
        );

        Ok(text)
    }

    /// The offline half of [`ContentExtractor::extract`].
    pub fn extract_html(&self, html: &str) -> Result<ExtractedText> {
        let fragment = Readability::with_config(self.readability.clone()).transform(html)?;
        let paragraphs = paragraphs_from_html(&fragment)?;

        if paragraphs.is_empty() {
            tracing::debug!(bytes = html.len(), "no readable paragraphs");
        }

        ExtractedText::from_paragraphs(paragraphs)
    }
}

/// Extracts article text from `url` with default settings.
pub async fn extract_text(url: &str) -> Result<ExtractedText> {
    ContentExtractor::new().extract(url).await
}

/// Extracts article text from `url` with custom fetch and readability settings.
pub async fn extract_text_with_config(
    url: &str, fetch: &FetchConfig, readability: &ReadabilityConfig,
) -> Result<ExtractedText> {
    ContentExtractor::with_config(fetch.clone(), readability.clone()).extract(url).await
}
