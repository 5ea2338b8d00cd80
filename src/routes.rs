//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /api/weather/{city}`     - Weather lookup, city in the path
//! - `GET /api/weather?city={city}` - Weather lookup, city in the query string
//! - `GET /health`                 - Health check: cache backend
//! - anything else                 - `404 {"error": "Route not found"}`, including
//!   unsupported methods on the paths above
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::RateLimitSettings;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limits for the weather endpoints; peer-address
///   limiting requires serving with `ConnectInfo<SocketAddr>`
pub fn app_router(state: AppState, rate_limit: &RateLimitSettings) -> NormalizePath<Router> {
    let api_router = rate_limit::apply(api::routes::weather_routes(), rate_limit);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
