//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache operation timed out")]
    Timeout,
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with per-key expiry for serialized weather payloads.
///
/// Implementations must be thread-safe and provide atomic get and
/// set-with-expiry; callers perform no locking of their own. Unlike a
/// fail-open cache, errors are returned to the caller, which reports them
/// as internal failures.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache (`GET` / `SETEX`)
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with lazy expiry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on miss or if the entry expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached or times out.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value and
    /// resetting its expiry to `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write fails or times out.
    async fn set_with_expiry(&self, key: &str, ttl_seconds: u64, value: &str) -> CacheResult<()>;

    /// Returns the remaining lifetime of `key` in seconds, or `None` if absent.
    async fn time_to_live(&self, key: &str) -> CacheResult<Option<u64>>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports and logs.
    fn backend_name(&self) -> &'static str;
}
