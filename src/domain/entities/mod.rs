//! Core values of the weather lookup.
//!
//! - [`CityName`] - A validated city name and its cache key
//! - [`WeatherPayload`] - Upstream response body, passed through untouched
//! - [`WeatherLookup`] - A payload together with where it came from

pub mod city;
pub mod weather;

pub use city::{CityName, MissingCity};
pub use weather::{CacheStatus, WeatherLookup, WeatherPayload};
