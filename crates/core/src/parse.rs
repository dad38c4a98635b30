//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types, thin wrappers
//! around `scraper` that the readability transform walks.
//!
//! # Example
//!
//! ```rust
//! use precis_core::parse::Document;
//!
//! let html = r#"<html><body><p class="lead">Paragraph</p></body></html>"#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraphs = doc.select("p.lead").unwrap();
//! assert_eq!(paragraphs[0].text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{PrecisError, Result};

/// Represents a parsed HTML document or fragment.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a complete HTML document.
    ///
    /// Parsing is lenient; malformed markup is repaired the way browsers do.
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self { html: Html::parse_document(html) })
    }

    /// Parses an HTML fragment, such as the output of the readability transform.
    pub fn parse_fragment(html: &str) -> Result<Self> {
        Ok(Self { html: Html::parse_fragment(html) })
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use precis_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Returns the `<body>` element, if the document has one.
    pub fn body(&self) -> Option<Element<'_>> {
        self.select("body").ok()?.into_iter().next()
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        self.select("title")
            .ok()?
            .into_iter()
            .next()
            .map(|el| el.text().trim().to_string())
            .filter(|title| !title.is_empty())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// Two `Element`s compare equal when they point at the same node of the same
/// tree, which is what candidate bookkeeping relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Gets the inner HTML of this element, excluding its own tags.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the outer HTML of this element, including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the text content of this element.
    ///
    /// Concatenates every descendant text node, so text inside inline
    /// children (`<b>`, `<a>`, `<span>`) is included.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Character count of [`Element::text`].
    pub fn text_len(&self) -> usize {
        self.element.text().map(|t| t.chars().count()).sum()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Parent element, or `None` at the root.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::new)
    }

    /// Element children, skipping text and comment nodes.
    pub fn child_elements(&self) -> Vec<Element<'a>> {
        self.element.children().filter_map(ElementRef::wrap).map(Element::new).collect()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::new).collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PrecisError::HtmlParseError(format!("Invalid selector: {}", e)))
}
