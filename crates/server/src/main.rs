mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use precis_core::{API_KEY_ENV, DEFAULT_FETCH_TIMEOUT, FetchConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::routes::create_router;
use crate::state::{AppState, FormDefaults};

/// HTTP front end for summarizing web articles
#[derive(Parser, Debug)]
#[command(name = "precis-server", version, about, long_about = None)]
struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "PRECIS_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Whole-request timeout in seconds
    #[arg(long, env = "PRECIS_REQUEST_TIMEOUT", default_value_t = 90)]
    request_timeout: u64,

    /// Page fetch timeout in seconds
    #[arg(long, env = "PRECIS_FETCH_TIMEOUT", default_value_t = DEFAULT_FETCH_TIMEOUT)]
    fetch_timeout: u64,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "PRECIS_BASE_URL")]
    base_url: Option<String>,

    /// Environment variable holding a fallback API key for requests that omit one
    #[arg(long, default_value = API_KEY_ENV)]
    api_key_env: String,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();

    let defaults = FormDefaults {
        base_url: args.base_url,
        api_key_env: args.api_key_env,
        fetch: FetchConfig { timeout: args.fetch_timeout, ..Default::default() },
        ..Default::default()
    };
    let app = create_router(AppState::new(defaults), Duration::from_secs(args.request_timeout));

    let listener = TcpListener::bind(args.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}
