//! wbproxy - caching, aggregating proxy for World Bank indicator data.
//!
//! Serves the country catalog, the indicator catalog, per-country series and
//! multi-country comparisons to a browser front end.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wbproxy_core::{ApiClient, CacheManager};
use wbproxy_server::{build_router, AppState, Config};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=wbproxy_core=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                return;
            }
            Err(e) => warn!(error = %e, "Could not register SIGTERM handler"),
        }
    }
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not register Ctrl-C handler");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::from_env()?;
    info!(
        upstream = %config.upstream_url,
        timeout_secs = config.request_timeout.as_secs(),
        cache_ttl_secs = config.cache_ttl.num_seconds(),
        "wbproxy starting"
    );

    let cache = Arc::new(CacheManager::new(config.cache_ttl));
    let client = ApiClient::new(&config.upstream_url, config.request_timeout, Arc::clone(&cache))
        .context("Failed to create upstream client")?;
    let app = build_router(AppState::new(client));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "wbproxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("Server failed")?;

    cache.dispose();
    info!("wbproxy shutting down");
    Ok(())
}
