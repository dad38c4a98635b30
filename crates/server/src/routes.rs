use std::time::{Duration, Instant};

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use precis_core::{ContentExtractor, ReadabilityConfig, SummaryConfig, resolve_api_key, summarize};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::error::ApiError;
use crate::state::{AppState, FormDefaults};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub max_words: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub article_text: String,
    pub paragraphs: usize,
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/summarize", post(summarize_handler))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn options(State(state): State<AppState>) -> Json<FormDefaults> {
    Json(state.defaults.as_ref().clone())
}

/// Validates the form fields and builds the per-request summary config
fn summary_config(req: &SummarizeRequest, defaults: &FormDefaults) -> Result<SummaryConfig, ApiError> {
    if req.url.trim().is_empty() {
        return Err(ApiError::bad_request("Please paste a valid article URL."));
    }

    let max_words = req.max_words.unwrap_or(defaults.default_words);
    if !(defaults.min_words..=defaults.max_words).contains(&max_words) {
        return Err(ApiError::bad_request(format!(
            "max_words must be between {} and {}, got {}",
            defaults.min_words, defaults.max_words, max_words
        )));
    }

    let mut builder = SummaryConfig::builder()
        .max_words(max_words)
        .language(req.language.as_deref().unwrap_or(&defaults.default_language))
        .model(req.model.as_deref().unwrap_or(&defaults.default_model))
        .api_key_env(&defaults.api_key_env);

    if let Some(key) = &req.api_key {
        builder = builder.api_key(key);
    }
    if let Some(base_url) = &defaults.base_url {
        builder = builder.base_url(base_url);
    }

    Ok(builder.build()?)
}

async fn summarize_handler(
    State(state): State<AppState>, Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let start = Instant::now();
    let url = req.url.trim();

    let result = async {
        let config = summary_config(&req, &state.defaults)?;
        resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;

        let extractor = ContentExtractor::with_config(state.defaults.fetch.clone(), ReadabilityConfig::default());
        let text = extractor.extract(url).await?;
        let article_text = text.as_text();
        let summary = summarize(&article_text, &config).await?;

        Ok::<_, ApiError>(SummarizeResponse { summary, article_text, paragraphs: text.paragraph_count() })
    }
    .await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(response) => tracing::info!(url, paragraphs = response.paragraphs, duration_ms, "summary served"),
        Err(err) => tracing::warn!(
            url,
            status = err.status.as_u16(),
            kind = err.kind,
            duration_ms,
            "summary request failed"
        ),
    }

    result.map(Json)
}
