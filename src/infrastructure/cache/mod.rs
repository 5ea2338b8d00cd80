//! Caching layer for weather responses.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process TTL cache for development and tests

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
