//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::WeatherService;
use crate::domain::weather_provider::WeatherProvider;
use crate::infrastructure::cache::CacheService;

/// State shared by all request handlers.
///
/// Clients are constructed once at startup and passed in explicitly, so
/// tests can substitute fakes for the upstream provider and the cache.
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the weather service from its collaborators.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        let weather_service = Arc::new(WeatherService::new(
            provider,
            cache.clone(),
            cache_ttl_seconds,
        ));

        Self {
            weather_service,
            cache,
        }
    }
}
