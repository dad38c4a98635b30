//! The readability transform.
//!
//! Reduces a full HTML page to a fragment holding only its most article-like
//! region. Paragraphs vote for their parent and grandparent containers, the
//! best container wins, and qualifying siblings are pulled in alongside it.
//!
//! # Example
//!
//! ```rust
//! use precis_core::Readability;
//!
//! let html = r#"<html><body>
//!     <div class="sidebar"><p>Subscribe to our newsletter for weekly updates and offers.</p></div>
//!     <article><p>The committee met on Tuesday, reviewed the budget, and approved the plan.</p></article>
//! </body></html>"#;
//!
//! let fragment = Readability::new().transform(html).unwrap();
//! assert!(fragment.contains("approved the plan"));
//! assert!(!fragment.contains("newsletter"));
//! ```

use crate::parse::{Document, Element};
use crate::postprocess::{PostProcessConfig, postprocess_html};
use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::scoring::{ScoreConfig, initial_score, link_density, paragraph_score};
use crate::{PrecisError, Result};

/// Tags whose text votes for the enclosing container
const PARAGRAPH_TAGS: &str = "p, pre, td, blockquote";

/// How many strong candidates must share an ancestor before it is promoted
const MIN_SHARED_CANDIDATES: usize = 3;

/// Configuration for the readability transform.
///
/// # Example
///
/// ```rust
/// use precis_core::ReadabilityConfig;
///
/// let config = ReadabilityConfig::builder()
///     .min_paragraph_chars(40)
///     .preserve_images(false)
///     .build();
/// assert_eq!(config.min_paragraph_chars, 40);
/// ```
#[derive(Debug, Clone)]
pub struct ReadabilityConfig {
    /// Minimum characters for a paragraph to vote (default: 25).
    pub min_paragraph_chars: usize,

    /// Number of top candidates considered for a shared ancestor (default: 5).
    pub nb_top_candidates: usize,

    /// Sibling score threshold as a fraction of the top score (default: 0.2).
    pub sibling_threshold: f64,

    /// Whether to remove unlikely candidates before scoring (default: true).
    pub remove_unlikely: bool,

    /// Whether to preserve class attributes in the fragment (default: false).
    pub keep_classes: bool,

    /// Whether to preserve images in the fragment (default: true).
    pub preserve_images: bool,

    /// Whether to run a second pass that keeps chrome, hidden and unlikely
    /// regions when the first leaves no paragraph text (default: true).
    pub retry_lenient: bool,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            min_paragraph_chars: 25,
            nb_top_candidates: 5,
            sibling_threshold: 0.2,
            remove_unlikely: true,
            keep_classes: false,
            preserve_images: true,
            retry_lenient: true,
        }
    }
}

impl ReadabilityConfig {
    /// Creates a new builder for ReadabilityConfig.
    pub fn builder() -> ReadabilityConfigBuilder {
        ReadabilityConfigBuilder::new()
    }
}

/// Builder for ReadabilityConfig.
pub struct ReadabilityConfigBuilder {
    config: ReadabilityConfig,
}

impl ReadabilityConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReadabilityConfig::default() }
    }

    /// Sets the minimum paragraph length that counts towards scoring.
    pub fn min_paragraph_chars(mut self, value: usize) -> Self {
        self.config.min_paragraph_chars = value;
        self
    }

    /// Sets the number of top candidates.
    pub fn nb_top_candidates(mut self, value: usize) -> Self {
        self.config.nb_top_candidates = value;
        self
    }

    /// Sets the sibling threshold.
    pub fn sibling_threshold(mut self, value: f64) -> Self {
        self.config.sibling_threshold = value;
        self
    }

    /// Sets whether to remove unlikely candidates.
    pub fn remove_unlikely(mut self, value: bool) -> Self {
        self.config.remove_unlikely = value;
        self
    }

    /// Sets whether to preserve class attributes in output HTML.
    pub fn keep_classes(mut self, value: bool) -> Self {
        self.config.keep_classes = value;
        self
    }

    /// Sets whether to preserve images in output HTML.
    pub fn preserve_images(mut self, value: bool) -> Self {
        self.config.preserve_images = value;
        self
    }

    /// Sets whether to retry without removing unlikely regions.
    pub fn retry_lenient(mut self, value: bool) -> Self {
        self.config.retry_lenient = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ReadabilityConfig {
        self.config
    }
}

impl Default for ReadabilityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of the readability transform.
#[derive(Debug, Clone)]
pub struct ReadableContent {
    /// The readable fragment, wrapped in `<div id="readability-page">`.
    pub html: String,
    /// Score of the winning container, `None` when the body was used.
    pub top_score: Option<f64>,
    /// Number of top-level elements copied into the fragment.
    pub element_count: usize,
    /// Title of the page, if it had one.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

/// Readability transform over raw HTML.
///
/// Stateless apart from its configuration, so one instance can serve any
/// number of documents.
pub struct Readability {
    config: ReadabilityConfig,
}

impl Readability {
    /// Creates a new Readability instance with default settings.
    pub fn new() -> Self {
        Self { config: ReadabilityConfig::default() }
    }

    /// Creates a new Readability instance with a custom configuration.
    pub fn with_config(config: ReadabilityConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReadabilityConfig {
        &self.config
    }

    /// Reduces `html` to its readable fragment.
    ///
    /// Never fails for lack of content: when no container earns a score the
    /// whole body is returned, and deciding whether that holds any prose is
    /// left to paragraph extraction.
    pub fn transform(&self, html: &str) -> Result<String> {
        self.parse(html).map(|content| content.html)
    }

    /// Like [`Readability::transform`], also reporting how the fragment was chosen.
    ///
    /// When the cleaned page leaves no paragraph text (the only prose sat in a
    /// sidebar, footer or comment block), the page is read again with only
    /// scripts and styles removed.
    pub fn parse(&self, html: &str) -> Result<ReadableContent> {
        let strict = PreprocessConfig { remove_unlikely: self.config.remove_unlikely, ..Default::default() };
        let content = self.read(html, &strict)?;

        if !self.config.retry_lenient || has_paragraph_text(&content.html)? {
            return Ok(content);
        }

        tracing::debug!(bytes = html.len(), "no paragraph text after cleaning, retrying without removals");
        let lenient = PreprocessConfig {
            remove_chrome: false,
            remove_unlikely: false,
            remove_hidden: false,
            ..Default::default()
        };
        self.read(html, &lenient)
    }

    /// One scoring pass over `html` cleaned with `preprocess`.
    fn read(&self, html: &str, preprocess: &PreprocessConfig) -> Result<ReadableContent> {
        let cleaned = preprocess_html(html, preprocess);
        let doc = Document::parse(&cleaned)?;
        let title = doc.title();

        let candidates = self.score_candidates(&doc)?;

        let (selected, top_score) = match self.select_top_candidate(&candidates) {
            Some(top) => (self.select_siblings(&top, &candidates), Some(top.score)),
            None => (vec![doc.body().ok_or(PrecisError::ContentNotFound)?], None),
        };

        let mut fragment = String::from(r#"<div id="readability-page">"#);
        for element in &selected {
            if element.tag_name() == "body" {
                fragment.push_str(&element.inner_html());
            } else {
                fragment.push_str(&element.outer_html());
            }
        }
        fragment.push_str("</div>");

        let postprocess = PostProcessConfig {
            strip_images: !self.config.preserve_images,
            keep_classes: self.config.keep_classes,
            ..Default::default()
        };
        let html = postprocess_html(&fragment, &postprocess);

        tracing::debug!(
            candidates = candidates.len(),
            top_score = top_score.unwrap_or_default(),
            elements = selected.len(),
            bytes = html.len(),
            "readability transform complete"
        );

        Ok(ReadableContent { html, top_score, element_count: selected.len(), title })
    }

    /// Let every long enough paragraph vote for its parent and grandparent.
    fn score_candidates<'a>(&self, doc: &'a Document) -> Result<Vec<Candidate<'a>>> {
        let score_config = ScoreConfig::default();
        let mut candidates: Vec<Candidate<'a>> = Vec::new();

        for paragraph in doc.select(PARAGRAPH_TAGS)? {
            let text = paragraph.text();
            let text = text.trim();
            if text.chars().count() < self.config.min_paragraph_chars {
                continue;
            }

            let Some(parent) = paragraph.parent() else {
                continue;
            };
            let points = paragraph_score(text, &score_config);
            add_score(&mut candidates, parent, points, &score_config);

            if let Some(grandparent) = parent.parent() {
                add_score(&mut candidates, grandparent, points / 2.0, &score_config);
            }
        }

        for candidate in &mut candidates {
            candidate.score *= 1.0 - link_density(&candidate.element);
        }

        Ok(candidates)
    }

    /// Pick the best candidate, promoting a common ancestor when several
    /// strong candidates sit under it (articles split into many `div`s).
    fn select_top_candidate<'a>(&self, candidates: &[Candidate<'a>]) -> Option<Candidate<'a>> {
        let mut ranked: Vec<Candidate<'a>> = candidates.to_vec();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.config.nb_top_candidates.max(1));

        let top = *ranked.first()?;
        let strong: Vec<Element<'a>> = ranked
            .iter()
            .skip(1)
            .filter(|c| top.score > 0.0 && c.score / top.score >= 0.75)
            .map(|c| c.element)
            .collect();

        if strong.len() >= MIN_SHARED_CANDIDATES {
            let mut ancestor = top.element.parent();
            while let Some(current) = ancestor {
                if current.tag_name() == "body" {
                    break;
                }
                let shared = strong.iter().filter(|el| is_ancestor(&current, el)).count();
                if shared >= MIN_SHARED_CANDIDATES {
                    let score = candidates.iter().find(|c| c.element == current).map_or(top.score, |c| c.score);
                    return Some(Candidate { element: current, score });
                }
                ancestor = current.parent();
            }
        }

        Some(top)
    }

    /// The top candidate plus the siblings that look like part of the same article,
    /// in document order.
    fn select_siblings<'a>(&self, top: &Candidate<'a>, candidates: &[Candidate<'a>]) -> Vec<Element<'a>> {
        let Some(parent) = top.element.parent() else {
            return vec![top.element];
        };
        if parent.tag_name() == "html" {
            return vec![top.element];
        }

        let threshold = (top.score * self.config.sibling_threshold).max(10.0);
        let top_class = top.element.attr("class").filter(|c| !c.is_empty());

        parent
            .child_elements()
            .into_iter()
            .filter(|sibling| {
                if *sibling == top.element {
                    return true;
                }

                let bonus = match (top_class, sibling.attr("class")) {
                    (Some(a), Some(b)) if a == b => top.score * 0.2,
                    _ => 0.0,
                };
                let score = candidates.iter().find(|c| c.element == *sibling).map(|c| c.score);
                if score.is_some_and(|s| s + bonus >= threshold) {
                    return true;
                }

                sibling.tag_name() == "p" && is_prose_paragraph(sibling)
            })
            .collect()
    }
}

impl Default for Readability {
    fn default() -> Self {
        Self::new()
    }
}

fn add_score<'a>(candidates: &mut Vec<Candidate<'a>>, element: Element<'a>, points: f64, config: &ScoreConfig) {
    if element.tag_name() == "html" {
        return;
    }

    match candidates.iter_mut().find(|c| c.element == element) {
        Some(candidate) => candidate.score += points,
        None => candidates.push(Candidate { element, score: initial_score(&element, config) + points }),
    }
}

fn has_paragraph_text(fragment: &str) -> Result<bool> {
    let doc = Document::parse_fragment(fragment)?;
    Ok(doc.select("p")?.iter().any(|p| !p.text().trim().is_empty()))
}

fn is_ancestor(ancestor: &Element<'_>, element: &Element<'_>) -> bool {
    let mut current = element.parent();
    while let Some(node) = current {
        if node == *ancestor {
            return true;
        }
        current = node.parent();
    }
    false
}

/// Long paragraphs with few links, or short link-free sentences
fn is_prose_paragraph(element: &Element<'_>) -> bool {
    let text = element.text();
    let text = text.trim();
    let length = text.chars().count();
    let density = link_density(element);

    if length > 80 {
        density < 0.25
    } else {
        length > 0 && density == 0.0 && (text.ends_with('.') || text.contains(". "))
    }
}

/// Convenience function: run the transform with default settings.
pub fn transform(html: &str) -> Result<String> {
    Readability::new().transform(html)
}
