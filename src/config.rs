//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `WEATHER_API_KEY` - Upstream API credential
//!
//! ## Cache
//!
//! ```bash
//! export CACHE_EXPIRE="3600"                 # entry lifetime in seconds
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! Or, from individual components:
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without any Redis settings the service uses an in-process cache.
//!
//! ## Optional Variables
//!
//! - `WEATHER_API_URL` - Upstream endpoint (default: OpenWeatherMap current weather)
//! - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
//! - `CACHE_TIMEOUT_MS` - Bound on every cache command (default: 2000)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RATE_LIMIT_ENABLED` - Per-IP rate limiting (default: `true`)
//! - `RATE_LIMIT_PERIOD_SECS` - Seconds to replenish one request (default: 1)
//! - `RATE_LIMIT_BURST` - Requests allowed in a burst (default: 50)
//! - `BEHIND_PROXY` - Read client IP from forwarded headers (default: `false`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::upstream::DEFAULT_ENDPOINT;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API credential (`WEATHER_API_KEY`).
    pub weather_api_key: String,
    pub weather_api_url: String,
    pub upstream_timeout_secs: u64,
    /// Lifetime of cached weather entries in seconds (`CACHE_EXPIRE`).
    pub cache_ttl_seconds: u64,
    pub cache_timeout_ms: u64,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub rate_limit: RateLimitSettings,
}

/// Per-IP rate limiting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub enabled: bool,
    /// Seconds after which one request of quota is replenished.
    pub period_secs: u64,
    pub burst: u32,
    /// When true, client IP is read from X-Forwarded-For / X-Real-IP / Forwarded.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            period_secs: 1,
            burst: 50,
            behind_proxy: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `WEATHER_API_KEY` is missing or `CACHE_EXPIRE`
    /// is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        let weather_api_key = env::var("WEATHER_API_KEY").context("WEATHER_API_KEY must be set")?;
        let weather_api_url =
            env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let upstream_timeout_secs = env_or("UPSTREAM_TIMEOUT_SECS", 10);

        let cache_ttl_seconds = match env::var("CACHE_EXPIRE") {
            Ok(raw) => raw.trim().parse().with_context(|| {
                format!("CACHE_EXPIRE must be a number of seconds, got '{}'", raw)
            })?,
            Err(_) => 3600,
        };
        let cache_timeout_ms = env_or("CACHE_TIMEOUT_MS", 2000);

        // Load Redis URL (optional)
        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let defaults = RateLimitSettings::default();
        let rate_limit = RateLimitSettings {
            enabled: env_flag("RATE_LIMIT_ENABLED").unwrap_or(defaults.enabled),
            period_secs: env_or("RATE_LIMIT_PERIOD_SECS", defaults.period_secs),
            burst: env_or("RATE_LIMIT_BURST", defaults.burst),
            behind_proxy: env_flag("BEHIND_PROXY").unwrap_or(defaults.behind_proxy),
        };

        Ok(Self {
            weather_api_key,
            weather_api_url,
            upstream_timeout_secs,
            cache_ttl_seconds,
            cache_timeout_ms,
            redis_url,
            listen_addr,
            log_level,
            log_format,
            rate_limit,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the API key is blank or the upstream URL is not http(s)
    /// - any timeout or the cache TTL is zero
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the Redis URL has an unknown scheme
    /// - rate limiting is enabled with a zero period or burst
    pub fn validate(&self) -> Result<()> {
        if self.weather_api_key.trim().is_empty() {
            anyhow::bail!("WEATHER_API_KEY must not be empty");
        }

        let upstream = url::Url::parse(&self.weather_api_url).with_context(|| {
            format!("WEATHER_API_URL is not a valid URL: '{}'", self.weather_api_url)
        })?;
        if upstream.scheme() != "http" && upstream.scheme() != "https" {
            anyhow::bail!(
                "WEATHER_API_URL must use http or https, got '{}'",
                upstream.scheme()
            );
        }

        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than 0");
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_EXPIRE must be greater than 0");
        }

        if self.cache_timeout_ms == 0 {
            anyhow::bail!("CACHE_TIMEOUT_MS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.rate_limit.enabled && (self.rate_limit.period_secs == 0 || self.rate_limit.burst == 0)
        {
            anyhow::bail!("RATE_LIMIT_PERIOD_SECS and RATE_LIMIT_BURST must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether Redis caching is enabled.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    /// Configuration as label/value pairs with secrets masked.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let redis = match self.redis_url {
            Some(ref url) => format!("{} (enabled)", mask_connection_string(url)),
            None => "disabled (in-memory cache)".to_string(),
        };

        let rate_limit = if self.rate_limit.enabled {
            format!(
                "1 req / {}s, burst {}{}",
                self.rate_limit.period_secs,
                self.rate_limit.burst,
                if self.rate_limit.behind_proxy {
                    ", behind proxy"
                } else {
                    ""
                }
            )
        } else {
            "disabled".to_string()
        };

        vec![
            ("Listen address", self.listen_addr.clone()),
            ("Upstream", self.weather_api_url.clone()),
            ("API key", mask_secret(&self.weather_api_key)),
            ("Upstream timeout", format!("{}s", self.upstream_timeout_secs)),
            ("Cache TTL", format!("{}s", self.cache_ttl_seconds)),
            ("Cache timeout", format!("{}ms", self.cache_timeout_ms)),
            ("Redis", redis),
            ("Rate limit", rate_limit),
            ("Log level", self.log_level.clone()),
            ("Log format", self.log_format.clone()),
        ]
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        for (label, value) in self.summary() {
            tracing::info!("  {}: {}", label, value);
        }
    }
}

/// Reads a parsed variable, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag (`true`/`1` or `false`/`0`).
fn env_flag(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Shows only the last four characters of a secret.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        Config {
            weather_api_key: "0123456789abcdef".to_string(),
            weather_api_url: DEFAULT_ENDPOINT.to_string(),
            upstream_timeout_secs: 10,
            cache_ttl_seconds: 3600,
            cache_timeout_ms: 2000,
            redis_url: None,
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            rate_limit: RateLimitSettings::default(),
        }
    }

    const ALL_VARS: &[&str] = &[
        "WEATHER_API_KEY",
        "WEATHER_API_URL",
        "UPSTREAM_TIMEOUT_SECS",
        "CACHE_EXPIRE",
        "CACHE_TIMEOUT_MS",
        "REDIS_URL",
        "REDIS_HOST",
        "REDIS_PORT",
        "REDIS_PASSWORD",
        "REDIS_DB",
        "RATE_LIMIT_ENABLED",
        "RATE_LIMIT_PERIOD_SECS",
        "RATE_LIMIT_BURST",
        "BEHIND_PROXY",
    ];

    fn clear_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for var in ALL_VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret("0123456789abcdef"), "***cdef");
    }

    #[test]
    fn test_summary_hides_api_key() {
        let config = test_config();
        let summary = config.summary();

        assert!(
            summary
                .iter()
                .all(|(_, value)| !value.contains("0123456789abcdef"))
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.cache_ttl_seconds = 0;
        assert!(config.validate().is_err());
        config.cache_ttl_seconds = 60;

        config.weather_api_key = "  ".to_string();
        assert!(config.validate().is_err());
        config.weather_api_key = "key".to_string();

        config.weather_api_url = "ftp://example.com/weather".to_string();
        assert!(config.validate().is_err());
        config.weather_api_url = "http://127.0.0.1:8080/weather".to_string();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.redis_url = Some("memcached://localhost".to_string());
        assert!(config.validate().is_err());
        config.redis_url = Some("rediss://cache.internal:6380/0".to_string());
        assert!(config.validate().is_ok());

        config.rate_limit.burst = 0;
        assert!(config.validate().is_err());
        config.rate_limit.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        unsafe {
            env::set_var("WEATHER_API_KEY", "test-key");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.weather_api_key, "test-key");
        assert_eq!(config.weather_api_url, DEFAULT_ENDPOINT);
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.cache_timeout(), Duration::from_millis(2000));
        assert!(!config.is_redis_enabled());
        assert_eq!(config.rate_limit, RateLimitSettings::default());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_cache_expire_parsed_as_seconds() {
        clear_env();
        unsafe {
            env::set_var("WEATHER_API_KEY", "test-key");
            env::set_var("CACHE_EXPIRE", "900");
        }
        assert_eq!(Config::from_env().unwrap().cache_ttl_seconds, 900);

        unsafe {
            env::set_var("CACHE_EXPIRE", "15m");
        }
        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_rate_limit_flags() {
        clear_env();
        unsafe {
            env::set_var("WEATHER_API_KEY", "test-key");
            env::set_var("RATE_LIMIT_ENABLED", "false");
            env::set_var("BEHIND_PROXY", "1");
            env::set_var("RATE_LIMIT_BURST", "5");
        }

        let config = Config::from_env().unwrap();
        assert!(!config.rate_limit.enabled);
        assert!(config.rate_limit.behind_proxy);
        assert_eq!(config.rate_limit.burst, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        // Empty password is treated as no password
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_HOST", "from-components");
        }

        let url = Config::load_redis_url().unwrap();

        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        clear_env();
    }
}
