//! Cache-aside weather lookup service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{CacheStatus, CityName, WeatherLookup, WeatherPayload};
use crate::domain::weather_provider::WeatherProvider;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service answering weather lookups from the cache, falling back to the
/// upstream provider on a miss.
///
/// Stateless across requests: all shared state lives in the cache store.
/// Concurrent misses for the same city may each fetch and each overwrite
/// the entry.
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl WeatherService {
    /// Creates a new weather service.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            provider,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Validates a raw city parameter and looks it up.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingParameter`] for an absent or blank city
    /// without touching the cache or the upstream. Otherwise see [`Self::lookup`].
    pub async fn get_weather(&self, raw_city: Option<&str>) -> Result<WeatherLookup, AppError> {
        let city = CityName::parse(raw_city)?;
        self.lookup(&city).await
    }

    /// Returns weather for `city`, reading through the cache.
    ///
    /// # Flow
    ///
    /// 1. Read the cache under the lower-cased city name
    /// 2. On hit, decode and return the stored payload
    /// 3. On miss, fetch from upstream with the original spelling
    /// 4. Store the payload under the same key with the configured TTL
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnavailable`] if the upstream call fails; nothing
    /// is cached in that case.
    ///
    /// Returns [`AppError::Internal`] if the cache fails or a payload cannot be
    /// (de)serialized.
    pub async fn lookup(&self, city: &CityName) -> Result<WeatherLookup, AppError> {
        let cache_key = city.cache_key();

        if let Some(cached) = self.cache.get(&cache_key).await? {
            debug!("Serving {} from cache", cache_key);
            let payload = WeatherPayload::from_cached(&cached)?;
            return Ok(WeatherLookup {
                payload,
                cache_status: CacheStatus::Hit,
            });
        }

        let payload = self.provider.fetch(city.as_str()).await?;

        let serialized = payload.to_cached()?;
        self.cache
            .set_with_expiry(&cache_key, self.cache_ttl_seconds, &serialized)
            .await?;

        info!(
            "Fetched weather for {} (cached for {}s)",
            city, self.cache_ttl_seconds
        );

        Ok(WeatherLookup {
            payload,
            cache_status: CacheStatus::Miss,
        })
    }
}
