//! Rate limiting middleware using token bucket algorithm.
//!
//! Protects the upstream API quota: every cache miss costs one upstream call,
//! so a single client cycling through city names could otherwise exhaust it.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitSettings;
use crate::state::AppState;

/// Builds a per-client rate limiter.
///
/// # Limits
///
/// - **Rate**: one request replenished every `period_secs` seconds
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Returns `None` if the settings are rejected by the builder (zero period or burst).
fn governor_layer<K: KeyExtractor>(
    settings: &RateLimitSettings,
    key_extractor: K,
) -> Option<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(settings.period_secs)
        .burst_size(settings.burst)
        .key_extractor(key_extractor)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Applies per-IP rate limiting to `router` according to `settings`.
///
/// # Key Extraction
///
/// - Default: the socket peer address (requires `ConnectInfo<SocketAddr>`)
/// - `behind_proxy`: `X-Forwarded-For`, `X-Real-IP` or `Forwarded`, falling back
///   to the peer address
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api::routes::weather_routes(), &config.rate_limit);
/// ```
pub fn apply(router: Router<AppState>, settings: &RateLimitSettings) -> Router<AppState> {
    if !settings.enabled {
        tracing::info!("Rate limiting disabled");
        return router;
    }

    let limited = if settings.behind_proxy {
        governor_layer(settings, SmartIpKeyExtractor).map(|layer| router.clone().layer(layer))
    } else {
        governor_layer(settings, PeerIpKeyExtractor).map(|layer| router.clone().layer(layer))
    };

    match limited {
        Some(router) => router,
        None => {
            tracing::warn!(
                "Invalid rate limit settings (period {}s, burst {}); rate limiting disabled",
                settings.period_secs,
                settings.burst
            );
            router
        }
    }
}
