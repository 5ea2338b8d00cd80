//! In-process cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// A cache held in process memory.
///
/// Used when Redis is not configured or unreachable at startup, and as the
/// backing store in tests. Expired entries are dropped lazily on read and
/// swept on every write.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        debug!("Using MemoryCache");
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!("Cache HIT: {}", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache MISS: {}", key);
                    return Ok(None);
                }
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        debug!("Cache MISS (expired): {}", key);
        Ok(None)
    }

    async fn set_with_expiry(&self, key: &str, ttl_seconds: u64, value: &str) -> CacheResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
        );

        debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }

    async fn time_to_live(&self, key: &str) -> CacheResult<Option<u64>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| (e.expires_at - now).as_secs()))
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
