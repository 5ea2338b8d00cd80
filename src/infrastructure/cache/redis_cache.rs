//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info};

const KEY_PREFIX: &str = "weather:";

/// Redis cache implementation for weather payloads.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Every command is bounded by `op_timeout`; failures and timeouts are logged and
/// returned to the caller.
pub struct RedisCache {
    client: ConnectionManager,
    op_timeout: Duration,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout` - Upper bound on every command, controlled via `CACHE_TIMEOUT_MS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = timeout(op_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::ConnectionError("Timed out connecting to Redis".to_string()))?
            .map_err(|e| {
                CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
            })?;

        let mut test_conn = manager.clone();
        timeout(op_timeout, test_conn.ping::<()>())
            .await
            .map_err(|_| CacheError::ConnectionError("Redis PING timed out".to_string()))?
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            op_timeout,
        })
    }

    /// Runs one Redis command under the configured timeout.
    async fn bounded<T, F>(&self, op: &str, key: &str, fut: F) -> CacheResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Redis {} error for {}: {}", op, key, e);
                Err(CacheError::OperationError(format!("{} failed: {}", op, e)))
            }
            Err(_) => {
                error!(
                    "Redis {} for {} timed out after {:?}",
                    op, key, self.op_timeout
                );
                Err(CacheError::Timeout)
            }
        }
    }
}

/// Constructs the full Redis key with namespace prefix.
fn build_key(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

/// Interprets a Redis `TTL` reply (`-2` missing, `-1` no expiry).
fn remaining_ttl(reply: i64) -> Option<u64> {
    match reply {
        -2 => None,
        -1 => Some(u64::MAX),
        secs => u64::try_from(secs).ok(),
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let full_key = build_key(key);
        let mut conn = self.client.clone();

        let value = self
            .bounded("GET", key, conn.get::<_, Option<String>>(&full_key))
            .await?;

        match &value {
            Some(_) => debug!("Cache HIT: {}", key),
            None => debug!("Cache MISS: {}", key),
        }

        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, ttl_seconds: u64, value: &str) -> CacheResult<()> {
        let full_key = build_key(key);
        let mut conn = self.client.clone();

        self.bounded(
            "SETEX",
            key,
            conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds),
        )
        .await?;

        debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }

    async fn time_to_live(&self, key: &str) -> CacheResult<Option<u64>> {
        let full_key = build_key(key);
        let mut conn = self.client.clone();

        let reply = self
            .bounded("TTL", key, conn.ttl::<_, i64>(&full_key))
            .await?;

        Ok(remaining_ttl(reply))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        matches!(
            timeout(self.op_timeout, conn.ping::<()>()).await,
            Ok(Ok(()))
        )
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key_namespaces_city() {
        assert_eq!(build_key("paris"), "weather:paris");
    }

    #[test]
    fn test_remaining_ttl_replies() {
        assert_eq!(remaining_ttl(-2), None);
        assert_eq!(remaining_ttl(-1), Some(u64::MAX));
        assert_eq!(remaining_ttl(0), Some(0));
        assert_eq!(remaining_ttl(3599), Some(3599));
    }
}
