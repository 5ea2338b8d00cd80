#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use weather_cache::api::routes::weather_routes;
use weather_cache::domain::entities::WeatherPayload;
use weather_cache::domain::weather_provider::{UpstreamError, WeatherProvider};
use weather_cache::infrastructure::cache::{CacheError, CacheResult, CacheService, MemoryCache};
use weather_cache::state::AppState;

pub const TEST_TTL: u64 = 900;

pub fn sample_payload(city: &str) -> Value {
    json!({
        "coord": { "lon": 2.35, "lat": 48.85 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
        "main": { "temp": 289.4, "humidity": 62 },
        "name": city,
        "cod": 200
    })
}

/// Upstream stand-in that records every city it is asked for.
pub struct FakeProvider {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeProvider {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch(&self, city: &str) -> Result<WeatherPayload, UpstreamError> {
        self.calls.lock().unwrap().push(city.to_string());

        if self.fail {
            return Err(UpstreamError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        Ok(WeatherPayload::new(sample_payload(city)))
    }
}

/// Memory cache that records reads and writes, optionally failing every call.
pub struct RecordingCache {
    inner: MemoryCache,
    reads: Mutex<Vec<String>>,
    writes: Mutex<Vec<(String, u64)>>,
    fail: bool,
}

impl RecordingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryCache::new(),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryCache::new(),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(String, u64)> {
        self.writes.lock().unwrap().clone()
    }

    /// Seeds an entry without recording it as a write.
    pub async fn seed(&self, key: &str, value: &Value) {
        self.inner
            .set_with_expiry(key, TEST_TTL, &value.to_string())
            .await
            .unwrap();
    }

    /// Seeds an entry from its exact cached text.
    pub async fn seed_raw(&self, key: &str, raw: &str) {
        self.inner.set_with_expiry(key, TEST_TTL, raw).await.unwrap();
    }

    pub async fn stored_raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }

    pub async fn stored(&self, key: &str) -> Option<Value> {
        self.inner
            .get(key)
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.reads.lock().unwrap().push(key.to_string());
        if self.fail {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set_with_expiry(&self, key: &str, ttl_seconds: u64, value: &str) -> CacheResult<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), ttl_seconds));
        if self.fail {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        self.inner.set_with_expiry(key, ttl_seconds, value).await
    }

    async fn time_to_live(&self, key: &str) -> CacheResult<Option<u64>> {
        self.inner.time_to_live(key).await
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

pub fn create_test_state(provider: Arc<FakeProvider>, cache: Arc<RecordingCache>) -> AppState {
    AppState::new(provider, cache, TEST_TTL)
}

/// Weather routes mounted the way the application mounts them, without middleware.
pub fn api_app(state: AppState) -> Router {
    Router::new().nest("/api", weather_routes()).with_state(state)
}
