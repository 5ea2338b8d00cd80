//! Domain layer containing the weather lookup model.
//!
//! This module defines the values that flow through a lookup and the contract
//! for the upstream weather provider. It has no dependencies on HTTP or cache
//! infrastructure.
//!
//! # Architecture
//!
//! - [`entities`] - City names, their validation error and opaque weather payloads
//! - [`weather_provider`] - Upstream provider trait and its error type
//!
//! # Lookup Flow
//!
//! 1. HTTP handler extracts the raw city parameter
//! 2. [`entities::CityName`] trims it and derives the case-insensitive cache key
//! 3. [`crate::application::services::WeatherService`] runs the cache-aside lookup
//! 4. On a miss, [`weather_provider::WeatherProvider::fetch`] calls the upstream API

pub mod entities;
pub mod weather_provider;
