//! Upstream weather provider contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::WeatherPayload;

/// Failures of a single upstream call.
///
/// None of these are retried; the lookup surfaces them as
/// [`crate::error::AppError::UpstreamUnavailable`].
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream returned a malformed body: {0}")]
    Decode(String),

    #[error("upstream client misconfigured: {0}")]
    Config(String),
}

/// Source of current weather data for a city.
///
/// Implementations hold their own credentials and transport settings.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::OpenWeatherClient`] - OpenWeatherMap HTTP API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current weather for `city`, spelled as the client sent it.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on network failure, timeout, a non-2xx
    /// response, or a body that is not valid JSON.
    async fn fetch(&self, city: &str) -> Result<WeatherPayload, UpstreamError>;
}
