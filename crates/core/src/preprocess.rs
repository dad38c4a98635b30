use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::{NEGATIVE_PATTERN, POSITIVE_PATTERN};

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to remove script, style, noscript, iframe, svg, canvas, template and button tags
    pub remove_unwanted: bool,
    /// Whether to remove nav, aside and footer chrome
    pub remove_chrome: bool,
    /// Whether to remove unlikely candidates
    pub remove_unlikely: bool,
    /// Whether to keep positive candidates even if they match unlikely patterns
    pub keep_positive: bool,
    /// Whether to remove hidden elements
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { remove_unwanted: true, remove_chrome: true, remove_unlikely: true, keep_positive: true, remove_hidden: true }
    }
}

const UNWANTED_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg", "canvas", "template", "button"];
const CHROME_TAGS: &[&str] = &["nav", "aside", "footer"];

/// Elements the unlikely-candidate pass never removes
const STRUCTURAL_TAGS: &[&str] = &["html", "body", "article", "main", "a"];

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is a valid regex"));
static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("hidden pattern is a valid regex")
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Preprocess HTML by removing boilerplate before scoring
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut processed = remove_comments(html);

    if config.remove_unwanted {
        processed = remove_tags(&processed, UNWANTED_TAGS);
    }

    if config.remove_chrome {
        processed = remove_tags(&processed, CHROME_TAGS);
    }

    if config.remove_unlikely {
        processed = remove_unlikely_candidates(&processed, config.keep_positive);
    }

    if config.remove_hidden {
        processed = remove_hidden_elements(&processed);
    }

    normalize_whitespace(&processed)
}

/// Run a streaming rewrite, falling back to the input if lol_html rejects it
fn rewrite(html: &str, settings: lol_html::Settings<'_, '_>) -> String {
    let mut output = Vec::with_capacity(html.len());
    let completed = {
        let mut rewriter = lol_html::HtmlRewriter::new(settings, |c: &[u8]| {
            output.extend_from_slice(c);
        });
        rewriter.write(html.as_bytes()).is_ok() && rewriter.end().is_ok()
    };

    if !completed {
        return html.to_string();
    }

    match String::from_utf8(output) {
        Ok(rewritten) if !rewritten.is_empty() => rewritten,
        Ok(_) => html.to_string(),
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Remove every element with one of the given tag names, content included
fn remove_tags(html: &str, tags: &[&str]) -> String {
    rewrite(
        html,
        lol_html::Settings {
            element_content_handlers: tags
                .iter()
                .map(|tag| {
                    lol_html::element!(tag, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
    )
}

/// Remove HTML comments from the document
fn remove_comments(html: &str) -> String {
    COMMENT.replace_all(html, "").to_string()
}

fn is_unlikely(value: &str, keep_positive: bool) -> bool {
    NEGATIVE_PATTERN.is_match(value) && (!keep_positive || !POSITIVE_PATTERN.is_match(value))
}

/// Remove elements whose id or class matches the unlikely candidate patterns
fn remove_unlikely_candidates(html: &str, keep_positive: bool) -> String {
    rewrite(
        html,
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("*", |el| {
                if STRUCTURAL_TAGS.contains(&el.tag_name().as_str()) {
                    return Ok(());
                }

                let id_unlikely = el.get_attribute("id").is_some_and(|id| is_unlikely(&id, keep_positive));
                let class_unlikely = el.get_attribute("class").is_some_and(|class| {
                    class.split_whitespace().any(|name| is_unlikely(name, keep_positive))
                });

                if id_unlikely || class_unlikely {
                    el.remove();
                }
                Ok(())
            })],
            ..Default::default()
        },
    )
}

/// Remove elements with display:none, visibility:hidden or the hidden attribute
fn remove_hidden_elements(html: &str) -> String {
    rewrite(
        html,
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("*", |el| {
                let hidden_style = el.get_attribute("style").is_some_and(|style| HIDDEN_STYLE.is_match(&style));
                if hidden_style || el.has_attribute("hidden") {
                    el.remove();
                }
                Ok(())
            })],
            ..Default::default()
        },
    )
}

/// Collapse whitespace runs so text lengths reflect visible text
fn normalize_whitespace(html: &str) -> String {
    WHITESPACE.replace_all(html, " ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_unwanted_tags() {
        let html = r#"
            <html>
                <head><script>alert('test');</script><style>body{color:red;}</style></head>
                <body>
                    <noscript>Enable JavaScript</noscript>
                    <iframe src="https://example.com"></iframe>
                    <svg><rect width="100" height="100"/></svg>
                    <canvas id="chart"></canvas>
                    <button>Share</button>
                    <p>Content</p>
                </body>
            </html>
        "#;

        let result = remove_tags(html, UNWANTED_TAGS);
        assert!(!result.contains("<script"));
        assert!(!result.contains("<style"));
        assert!(!result.contains("<noscript"));
        assert!(!result.contains("<iframe"));
        assert!(!result.contains("<svg"));
        assert!(!result.contains("<canvas"));
        assert!(!result.contains("Share"));
        assert!(result.contains("<p>Content</p>"));

        assert!(!result.contains("alert"), "Script content should be removed");
        assert!(!result.contains("color:red"), "Style content should be removed");
        assert!(!result.contains("Enable JavaScript"), "Noscript content should be removed");
    }

    #[test]
    fn test_remove_chrome_tags() {
        let html = r##"<body><nav><a href="#">Home</a></nav><p>Story</p><aside>Ads</aside><footer>Legal</footer></body>"##;
        let result = remove_tags(html, CHROME_TAGS);
        assert!(!result.contains("Home"));
        assert!(!result.contains("Ads"));
        assert!(!result.contains("Legal"));
        assert!(result.contains("<p>Story</p>"));
    }

    #[test]
    fn test_remove_comments() {
        let html = "<body><!-- a\nmultiline comment --><p>Visible content</p><!-- Another --></body>";

        let result = remove_comments(html);
        assert!(!result.contains("<!--"));
        assert!(!result.contains("multiline"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_remove_unlikely_candidates() {
        let html = r#"
            <html>
                <body>
                    <div id="sidebar">Sidebar content</div>
                    <div id="main-content">Main content</div>
                    <div class="banner-ad">Ad</div>
                    <div class="article">Article content</div>
                </body>
            </html>
        "#;

        let result = remove_unlikely_candidates(html, true);
        assert!(!result.contains("Sidebar content"));
        assert!(!result.contains("banner-ad"));
        assert!(result.contains("Main content"));
        assert!(result.contains("Article content"));
    }

    #[test]
    fn test_unlikely_keeps_structural_tags() {
        let html = r#"<html><body class="has-sidebar"><article class="comment-free"><p>Kept</p></article></body></html>"#;
        let result = remove_unlikely_candidates(html, false);
        assert!(result.contains("Kept"));
    }

    #[test]
    fn test_remove_hidden_elements() {
        let html = r#"
            <html>
                <body>
                    <div style="display:none">Hidden content</div>
                    <div style="visibility: hidden">Invisible content</div>
                    <div hidden>Attribute hidden</div>
                    <div>Visible content</div>
                </body>
            </html>
        "#;

        let result = remove_hidden_elements(html);
        assert!(!result.contains("Hidden content"));
        assert!(!result.contains("Invisible content"));
        assert!(!result.contains("Attribute hidden"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_normalize_whitespace() {
        let result = normalize_whitespace("<body>    Multiple   spaces\t\t\n\nhere</body>");
        assert_eq!(result, "<body> Multiple spaces here</body>");
    }

    #[test]
    fn test_preprocess_full_pipeline() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script>console.log('test');</script>
                <style>.hidden{display:none;}</style>
                <!-- Comment -->
            </head>
            <body>
                <div id="sidebar" class="menu">
                    <p>Sidebar</p>
                </div>
                <div id="main" class="article">
                    <p style="display:none">Hidden</p>
                    <p>Content</p>
                </div>
            </body>
            </html>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());

        assert!(!result.contains("<script"));
        assert!(!result.contains("<style"));
        assert!(!result.contains("<!--"));
        assert!(!result.contains("Sidebar"));
        assert!(!result.contains("Hidden"));
        assert!(result.contains("main"));
        assert!(result.contains("Content"));
    }
}
