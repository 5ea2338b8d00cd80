//! OpenWeatherMap current-weather client.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::entities::WeatherPayload;
use crate::domain::weather_provider::{UpstreamError, WeatherProvider};

/// Default current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Characters of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 500;

/// HTTP client for the OpenWeatherMap `weather` endpoint.
///
/// Issues one `GET {endpoint}?q={city}&appid={api_key}` per call with a fixed
/// request timeout. The API key never appears in errors or logs.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl OpenWeatherClient {
    /// Builds a client for `endpoint` with the given credential and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Config`] if the endpoint is not a valid URL or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(endpoint: &str, api_key: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| UpstreamError::Config(format!("invalid endpoint {}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(e.without_url().to_string())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherPayload, UpstreamError> {
        debug!("Fetching current weather for {} from {}", city, self.endpoint);

        let resp = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            warn!("Upstream returned {} for {}", status, city);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Decode(e.without_url().to_string())
            }
        })?;

        Ok(WeatherPayload::new(value))
    }
}
