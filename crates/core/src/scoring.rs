use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Weights for the content scoring algorithm
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum bonus from paragraph length
    pub max_length_bonus: f64,
    /// Characters per length bonus point
    pub chars_per_point: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { positive_weight: 25.0, negative_weight: -25.0, max_length_bonus: 3.0, chars_per_point: 100 }
    }
}

/// Calculate the base score for an element based on its tag name
///
/// Scores are assigned based on how likely a tag is to contain main content:
/// - ARTICLE: +10 (primary content container)
/// - SECTION, MAIN: +8 (content section)
/// - DIV: +5 (generic container)
/// - TD, BLOCKQUOTE, PRE: +3 (content elements)
/// - FORM, ADDRESS, OL, UL, DL, DD, DT, LI: -3 (list/metadata elements)
/// - H1-H6, TH, HEADER, FOOTER, NAV: -5 (header/navigation elements)
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" | "main" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" | "pre" => 3.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID fragments that suggest an element holds the article
pub(crate) static POSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)")
        .expect("positive pattern is a valid regex")
});

/// Class/ID fragments that suggest boilerplate
pub(crate) static NEGATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|share|shoutbox|sidebar|skyscraper|sponsor|ad-break|agegate|pagination|pager|popup|promo|widget)",
    )
    .expect("negative pattern is a valid regex")
});

/// Calculate the class/ID weight adjustment for an element
///
/// The id is checked before the class list; a positive match wins over a
/// negative one on the same value.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    if let Some(id) = element.attr("id") {
        if POSITIVE_PATTERN.is_match(id) {
            return config.positive_weight;
        }
        if NEGATIVE_PATTERN.is_match(id) {
            return config.negative_weight;
        }
    }

    if let Some(class) = element.attr("class") {
        for class_name in class.split_whitespace() {
            if POSITIVE_PATTERN.is_match(class_name) {
                return config.positive_weight;
            }
            if NEGATIVE_PATTERN.is_match(class_name) {
                return config.negative_weight;
            }
        }
    }

    0.0
}

/// Score a candidate container starts with before paragraphs vote for it
pub fn initial_score(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    base_tag_score(element) + class_id_weight(element, config)
}

/// Score a paragraph contributes to its ancestors
///
/// One point for existing, one per comma (prose reads with commas, menus do
/// not), and one per `chars_per_point` characters up to `max_length_bonus`.
pub fn paragraph_score(text: &str, config: &ScoreConfig) -> f64 {
    let commas = text.matches(',').count() as f64;
    let length_bonus = ((text.chars().count() / config.chars_per_point) as f64).min(config.max_length_bonus);

    1.0 + commas + length_bonus
}

/// Calculate the link density of an element
///
/// Link density is the ratio of link text characters to total text characters.
/// Returns a value from 0.0 (no links) to 1.0 (all text is in links).
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text_len();

    if text_length == 0 {
        return 0.0;
    }

    let link_text_length = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text_len())
        .sum::<usize>();

    link_text_length as f64 / text_length as f64
}
