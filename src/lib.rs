//! # Weather Cache
//!
//! A small weather lookup service that caches upstream responses, built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - City names, weather payloads and the provider trait
//! - **Application Layer** ([`application`]) - Cache-aside lookup orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis/in-memory cache and upstream HTTP client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - `GET /api/weather/{city}` with case-insensitive response caching
//! - Configurable cache expiry, Redis or in-process store
//! - Explicit timeouts on upstream and cache calls
//! - Per-IP rate limiting and request tracing
//!
//! ## Quick Start
//!
//! ```bash
//! export WEATHER_API_KEY="your-openweathermap-key"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! export CACHE_EXPIRE="600"
//!
//! cargo run
//! curl http://localhost:3000/api/weather/paris
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::WeatherService;
    pub use crate::domain::entities::{CacheStatus, CityName, WeatherLookup, WeatherPayload};
    pub use crate::domain::weather_provider::{UpstreamError, WeatherProvider};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheError, CacheResult, CacheService, MemoryCache};
    pub use crate::state::AppState;
}
