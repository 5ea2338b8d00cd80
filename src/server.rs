//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, upstream client construction, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::upstream::OpenWeatherClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache (or MemoryCache fallback)
/// - Upstream weather client
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache = build_cache(&config).await;

    let provider = OpenWeatherClient::new(
        &config.weather_api_url,
        config.weather_api_key.clone(),
        config.upstream_timeout(),
    )
    .context("Failed to build upstream weather client")?;

    let state = AppState::new(Arc::new(provider), cache, config.cache_ttl_seconds);

    let app = app_router(state, &config.rate_limit);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects to Redis when configured, otherwise falls back to an in-process cache.
async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache: in-memory (Redis not configured)");
        return Arc::new(MemoryCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_timeout()).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
            Arc::new(MemoryCache::new())
        }
    }
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
