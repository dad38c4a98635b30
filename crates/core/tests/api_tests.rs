//! Library API integration tests against a local fixture server
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use precis_core::*;
use rstest::rstest;
use serde_json::{Value, json};

const FIXTURE_KEY: &str = "sk-fixture";
const UNSET_ENV: &str = "PRECIS_TEST_SURELY_UNSET_VARIABLE";
const FIXTURE_SUMMARY: &str = "- River towns are rebuilding after a record flood.\n- Officials plan new levees.";

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {FIXTURE_KEY}"));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": {"message": "Incorrect API key provided"}})));
    }

    let user = body["messages"][1]["content"].as_str().unwrap_or_default();
    if !user.contains("River towns") && !user.contains("Three months after") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": {"message": "unexpected prompt"}})));
    }

    let reply = json!({
        "id": "chatcmpl-fixture",
        "object": "chat.completion",
        "model": body["model"],
        "choices": [{"index": 0, "message": {"role": "assistant", "content": format!("\n  {FIXTURE_SUMMARY}  \n")}}]
    });
    (StatusCode::OK, Json(reply))
}

async fn spawn_fixture_server() -> String {
    let article = fixture("article.html");
    let gallery = fixture("no_paragraphs.html");
    let blank = fixture("whitespace_paragraphs.html");
    let inline = fixture("nested_inline.html");

    let app = Router::new()
        .route("/article", get(move || async move { Html(article) }))
        .route("/gallery", get(move || async move { Html(gallery) }))
        .route("/blank", get(move || async move { Html(blank) }))
        .route("/inline", get(move || async move { Html(inline) }))
        .route("/moved", get(|| async { Redirect::permanent("/article") }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Html("<html><body><p>This page could not be found at all.</p></body></html>")) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Html("<p>Internal error, please try again later.</p>")) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<p>Too late to matter.</p>")
            }),
        )
        .route("/v1/chat/completions", post(chat_completions))
        .route("/empty/v1/chat/completions", post(|| async { Json(json!({"choices": []})) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn summary_config(base: &str, key: Option<&str>) -> SummaryConfig {
    let builder = SummaryConfig::builder().base_url(format!("{base}/v1")).api_key_env(UNSET_ENV).request_timeout(10);
    let builder = match key {
        Some(key) => builder.api_key(key),
        None => builder,
    };
    builder.build().unwrap()
}

#[tokio::test]
async fn test_extract_three_paragraph_article() {
    let base = spawn_fixture_server().await;
    let text = extract_text(&format!("{base}/article")).await.expect("should extract");

    assert_eq!(text.paragraph_count(), 3);
    let paragraphs = text.paragraphs();
    assert!(paragraphs[0].starts_with("Three months after the river crested"));
    assert!(paragraphs[1].starts_with("Volunteers from across the region"));
    assert!(paragraphs[2].starts_with("Local officials say"));
    assert_eq!(text.as_text(), paragraphs.join("\n\n"));

    let rendered = text.as_text();
    assert!(!rendered.contains("Subscribe today"));
    assert!(!rendered.contains("Copyright"));
    assert!(!rendered.contains("analytics"));
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let base = spawn_fixture_server().await;
    let document = fetch_url(&format!("{base}/moved"), &FetchConfig::default()).await.unwrap();

    assert!(document.url.ends_with("/article"));
    assert!(document.html.contains("River Towns Rebuild"));
}

#[rstest]
#[case::not_found("/missing", 404)]
#[case::server_error("/broken", 500)]
#[tokio::test]
async fn test_error_status_fails_without_parsing(#[case] path: &str, #[case] expected: u16) {
    let base = spawn_fixture_server().await;
    let err = extract_text(&format!("{base}{path}")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    match err {
        PrecisError::HttpStatus { status, url } => {
            assert_eq!(status, expected);
            assert!(url.ends_with(path));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[rstest]
#[case::no_paragraphs("/gallery")]
#[case::whitespace_paragraphs("/blank")]
#[tokio::test]
async fn test_content_not_found(#[case] path: &str) {
    let base = spawn_fixture_server().await;
    let err = extract_text(&format!("{base}{path}")).await.unwrap_err();

    assert!(matches!(err, PrecisError::ContentNotFound));
    assert_eq!(err.to_string(), "No readable text found at this URL");
}

#[tokio::test]
async fn test_nested_inline_markup() {
    let base = spawn_fixture_server().await;
    let text = extract_text(&format!("{base}/inline")).await.unwrap();

    assert_eq!(
        text.paragraphs()[0],
        "The council voted on the annual budget, approving it after a long, contentious debate."
    );
    assert!(text.paragraphs()[1].contains("from both parties praised the compromise"));
    assert!(text.paragraphs()[1].contains("a fair outcome"));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let base = spawn_fixture_server().await;
    let fetch = FetchConfig { timeout: 1, ..Default::default() };
    let err = extract_text_with_config(&format!("{base}/slow"), &fetch, &ReadabilityConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PrecisError::Timeout { timeout: 1 }));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_unreachable_host() {
    let err = extract_text("http://127.0.0.1:9/article").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_extract_then_summarize() {
    let base = spawn_fixture_server().await;
    let text = ContentExtractor::new().extract(&format!("{base}/article")).await.unwrap();
    let summary = summarize(&text.as_text(), &summary_config(&base, Some(FIXTURE_KEY))).await.unwrap();

    assert_eq!(summary, FIXTURE_SUMMARY);
    assert_ne!(summary, text.as_text());
    assert_eq!(summary, summary.trim());
}

#[tokio::test]
async fn test_summarize_rejected_key_is_provider_error() {
    let base = spawn_fixture_server().await;
    let err = summarize("River towns text.", &summary_config(&base, Some("sk-wrong"))).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_summarize_without_key() {
    let base = spawn_fixture_server().await;
    let err = summarize("River towns text.", &summary_config(&base, None)).await.unwrap_err();

    assert!(matches!(err, PrecisError::CredentialMissing { ref var } if var == UNSET_ENV));
}

#[tokio::test]
async fn test_summarize_empty_choices() {
    let base = spawn_fixture_server().await;
    let config = SummaryConfig::builder()
        .base_url(format!("{base}/empty/v1"))
        .api_key(FIXTURE_KEY)
        .build()
        .unwrap();

    let err = summarize("River towns text.", &config).await.unwrap_err();
    assert!(matches!(err, PrecisError::EmptyResponse));
}

#[test]
fn test_readability_api() {
    let html = fixture("article.html");
    let content = Readability::new().parse(&html).expect("should parse");

    assert!(content.top_score.is_some());
    assert_eq!(content.title.as_deref(), Some("River Towns Rebuild After the Flood"));
    assert!(content.html.starts_with(r#"<div id="readability-page">"#));

    let paragraphs = paragraphs_from_html(&content.html).unwrap();
    assert_eq!(paragraphs.len(), 3);
}

#[test]
fn test_edge_case_malformed() {
    let html = "<html><body><div><p>Unclosed paragraph that still holds enough text, and a comma.<div><p>Another one";
    let text = ContentExtractor::new().extract_html(html).unwrap();
    assert!(text.as_text().contains("Unclosed paragraph"));
    assert!(text.as_text().contains("Another one"));
}

#[test]
fn test_edge_case_unicode() {
    let html = "<html><body><article><p>日本語のテキスト、そして中文内容，还有 Ελληνικά κείμενο και émojis 🎉.</p></article></body></html>";
    let text = ContentExtractor::new().extract_html(html).unwrap();
    assert!(text.as_text().contains("日本語"));
    assert!(text.as_text().contains("🎉"));
}
