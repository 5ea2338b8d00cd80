//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete clients for the cache store and the upstream weather API.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and in-memory implementations)
//! - [`upstream`] - HTTP client for the upstream weather provider

pub mod cache;
pub mod upstream;
