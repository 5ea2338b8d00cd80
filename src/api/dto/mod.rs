//! Data Transfer Objects for API requests and responses.
//!
//! Weather payloads are passed through as raw JSON, so only the query
//! parameters and the health report have dedicated types.

pub mod health;
pub mod weather;
