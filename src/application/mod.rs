//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the cache store
//! and the upstream provider. Services consume trait objects and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::weather_service::WeatherService`] - Cache-aside weather lookup

pub mod services;
