//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod weather;

pub use fallback::not_found_handler;
pub use health::health_handler;
pub use weather::{weather_by_path_handler, weather_by_query_handler};
