//! Weather payload entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Weather data exactly as returned by the upstream provider.
///
/// The service never interprets the fields; the JSON document is cached and
/// echoed back verbatim. Object keys keep the upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherPayload(Value);

impl WeatherPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Restores a payload from its cached text form.
    pub fn from_cached(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Serializes the payload for storage in the cache.
    pub fn to_cached(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Where a lookup result was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value of the `x-cache` response header.
    pub fn as_header_value(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherLookup {
    pub payload: WeatherPayload,
    pub cache_status: CacheStatus,
}
