use std::sync::LazyLock;

use regex::Regex;

/// Configuration for cleaning up the readable fragment
#[derive(Debug, Clone)]
pub struct PostProcessConfig {
    /// Whether to remove empty nodes
    pub remove_empty_nodes: bool,
    /// Maximum passes for removing empty nodes
    pub max_empty_node_passes: usize,
    /// Whether to remove link lists with high link density
    pub remove_high_link_density: bool,
    /// Maximum link density threshold (0.0 to 1.0)
    pub max_link_density: f64,
    /// Whether to strip all images
    pub strip_images: bool,
    /// Whether to keep class attributes (default: false)
    pub keep_classes: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            remove_empty_nodes: true,
            max_empty_node_passes: 10,
            remove_high_link_density: true,
            max_link_density: 0.5,
            strip_images: false,
            keep_classes: false,
        }
    }
}

static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"<img[^>]*>"#).expect("img pattern is a valid regex"));
static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s+class=("[^"]*"|'[^']*')"#).expect("class pattern is a valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<a[\s>][^>]*>?(.*?)</a>").expect("link pattern is a valid regex"));

/// Post-process the readable fragment by removing what scoring let through
pub fn postprocess_html(html: &str, config: &PostProcessConfig) -> String {
    let mut processed = html.to_string();

    if config.strip_images {
        processed = IMG.replace_all(&processed, "").to_string();
    }

    if !config.keep_classes {
        processed = CLASS_ATTR.replace_all(&processed, "").to_string();
    }

    if config.remove_high_link_density {
        processed = remove_link_lists(&processed, config.max_link_density);
    }

    if config.remove_empty_nodes {
        processed = remove_empty_nodes(&processed, config.max_empty_node_passes);
    }

    processed
}

/// Remove empty nodes from HTML
///
/// A node is considered empty if it has no text content or only whitespace
/// and line breaks. Removing one can empty its parent, hence the passes.
fn remove_empty_nodes(html: &str, max_passes: usize) -> String {
    let tags = ["div", "p", "span", "section", "article", "header", "ul", "ol", "li"];
    let patterns: Vec<Regex> = tags
        .iter()
        .filter_map(|tag| Regex::new(&format!(r#"<{tag}(?:\s[^>]*)?>\s*(?:<br\s*/?>\s*)*</{tag}>"#)).ok())
        .collect();

    let mut result = html.to_string();
    for _ in 0..max_passes {
        let before = result.len();
        for re in &patterns {
            result = re.replace_all(&result, "").to_string();
        }
        if result.len() == before {
            break;
        }
    }

    result
}

/// Remove `ul`/`ol` lists that are mostly links (related posts, tag clouds)
fn remove_link_lists(html: &str, max_density: f64) -> String {
    let mut result = html.to_string();

    for tag in ["ul", "ol"] {
        let Ok(re) = Regex::new(&format!(r#"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>"#)) else {
            continue;
        };

        result = re
            .replace_all(&result, |caps: &regex::Captures| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let inner_html = caps.get(1).map_or("", |m| m.as_str());
                let text_length = strip_tags(inner_html).trim().chars().count();

                if text_length == 0 {
                    return whole.to_string();
                }

                let density = link_text_length(inner_html) as f64 / text_length as f64;
                if density > max_density { String::new() } else { whole.to_string() }
            })
            .to_string();
    }

    result
}

/// Strip HTML tags from a string, keeping only text content
fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").to_string()
}

/// Total length of link text in an HTML snippet
fn link_text_length(html: &str) -> usize {
    LINK.captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| strip_tags(m.as_str()).trim().chars().count())
        .sum()
}
