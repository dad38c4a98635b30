//! Page fetching over HTTP.
//!
//! One GET per call, bounded by a timeout, with no retries. A non-success
//! status fails the call before the body is read.

use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

use crate::{PrecisError, Result};

/// Default fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT: u64 = 20;

/// Settings for the single GET issued per extraction.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request bound in seconds, connect through body.
    pub timeout: u64,
    /// Sent as `User-Agent`; some sites refuse requests without a browser-like one.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: "Mozilla/5.0 (compatible; Precis/0.1; +https://github.com/stormlightlabs/precis)".to_string(),
        }
    }
}

/// Raw HTML of a fetched page together with the URL it was served from.
///
/// `url` is the final URL after redirects.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: String,
    pub html: String,
}

/// Downloads the page at `url`.
///
/// Follows redirects and respects the configured timeout. Any non-2xx status
/// is returned as [`PrecisError::HttpStatus`] without reading the body.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<FetchedDocument> {
    let parsed_url = Url::parse(url).map_err(|e| PrecisError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(PrecisError::Transport)?;

    let start = Instant::now();
    tracing::debug!(url = %parsed_url, timeout = config.timeout, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| timeout_or_transport(e, config.timeout))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        tracing::warn!(url = %final_url, status = status.as_u16(), "page returned error status");
        return Err(PrecisError::HttpStatus { status: status.as_u16(), url: final_url });
    }

    let html = response
        .text()
        .await
        .map_err(|e| timeout_or_transport(e, config.timeout))?;

    tracing::debug!(
        url = %final_url,
        bytes = html.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "page fetched"
    );

    Ok(FetchedDocument { url: final_url, html })
}

fn timeout_or_transport(err: reqwest::Error, timeout: u64) -> PrecisError {
    if err.is_timeout() { PrecisError::Timeout { timeout } } else { PrecisError::Transport(err) }
}
