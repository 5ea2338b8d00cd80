//! CLI administration tool for weather-cache.
//!
//! Provides commands for checking configuration, inspecting cached entries,
//! and calling the upstream provider without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Validate configuration and print a summary
//! cargo run --bin admin -- config check
//!
//! # Check Redis connectivity
//! cargo run --bin admin -- cache check
//!
//! # Show the cached entry for a city
//! cargo run --bin admin -- cache show Paris
//!
//! # Call the upstream once, optionally storing the result
//! cargo run --bin admin -- fetch Paris --store
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `weather_cache::config`.

use weather_cache::config::{self, Config};
use weather_cache::domain::entities::{CityName, WeatherPayload};
use weather_cache::domain::weather_provider::WeatherProvider;
use weather_cache::infrastructure::cache::{CacheService, RedisCache};
use weather_cache::infrastructure::upstream::OpenWeatherClient;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};

/// CLI tool for managing weather-cache.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Inspect the Redis cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Fetch current weather from the upstream, bypassing the cache
    Fetch {
        /// City name (prompted if omitted)
        city: Option<String>,

        /// Store the result in the cache with the configured TTL
        #[arg(long)]
        store: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration
    Check,
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Check Redis connection
    Check,

    /// Show the cached payload and remaining TTL for a city
    Show {
        /// City name (prompted if omitted)
        city: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Check => check_config(&config),
        },
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
        Commands::Fetch { city, store, yes } => fetch(&config, city, store, yes).await?,
    }

    Ok(())
}

/// Prints the validated configuration with secrets masked.
fn check_config(config: &Config) {
    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();

    for (label, value) in config.summary() {
        println!("  {:<18} {}", format!("{}:", label).bright_white(), value.cyan());
    }

    println!();
    println!("{}", "✅ Configuration is valid".green().bold());
}

/// Dispatches cache commands.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let cache = connect_redis(config).await?;

    match action {
        CacheAction::Check => {
            println!("{}", "🔍 Checking Redis connection...".bright_blue());

            if cache.health_check().await {
                println!("{}", "✅ Redis connection OK".green().bold());
            } else {
                println!("{}", "❌ Redis PING failed".red().bold());
            }
        }
        CacheAction::Show { city } => {
            let city = resolve_city(city)?;
            show_entry(&cache, &city).await?;
        }
    }

    Ok(())
}

/// Connects to the configured Redis instance.
async fn connect_redis(config: &Config) -> Result<RedisCache> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("Redis is not configured (set REDIS_URL or REDIS_HOST)")?;

    RedisCache::connect(redis_url, config.cache_timeout())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {}", e))
}

/// Takes the city from the command line or asks for it.
fn resolve_city(city: Option<String>) -> Result<CityName> {
    let raw = match city {
        Some(c) => c,
        None => Input::new().with_prompt("City").interact_text()?,
    };

    Ok(CityName::parse(Some(&raw))?)
}

/// Shows one cache entry.
///
/// # Output Format
///
/// ```text
/// 📦 Cache entry: paris
///
///   TTL:     512s
///   Payload: {"name":"Paris",...}
/// ```
async fn show_entry(cache: &RedisCache, city: &CityName) -> Result<()> {
    let key = city.cache_key();
    println!("{} {}", "📦 Cache entry:".bright_blue().bold(), key.cyan());
    println!();

    let value = cache
        .get(&key)
        .await
        .map_err(|e| anyhow::anyhow!("Cache error: {}", e))?;

    let Some(value) = value else {
        println!("{}", "  Not cached".yellow());
        return Ok(());
    };

    let ttl = cache
        .time_to_live(&key)
        .await
        .map_err(|e| anyhow::anyhow!("Cache error: {}", e))?;

    let ttl = match ttl {
        Some(u64::MAX) => "no expiry".red().to_string(),
        Some(secs) => format!("{}s", secs),
        None => "expired".yellow().to_string(),
    };

    println!("  {:<8} {}", "TTL:".bright_white(), ttl);
    println!("  {:<8} {}", "Payload:".bright_white(), pretty(&value));
    println!();

    Ok(())
}

/// Calls the upstream once and optionally stores the payload.
async fn fetch(config: &Config, city: Option<String>, store: bool, yes: bool) -> Result<()> {
    let city = resolve_city(city)?;

    println!(
        "{} {}",
        "🌤  Fetching weather for".bright_blue().bold(),
        city.as_str().cyan()
    );
    println!();

    let client = OpenWeatherClient::new(
        &config.weather_api_url,
        config.weather_api_key.clone(),
        config.upstream_timeout(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let payload = client
        .fetch(city.as_str())
        .await
        .map_err(|e| anyhow::anyhow!("Upstream error: {}", e))?;

    let serialized = payload.to_cached()?;
    println!("{}", pretty(&serialized));
    println!();

    if !store {
        return Ok(());
    }

    let cache = connect_redis(config).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Store under '{}' for {}s?",
                city.cache_key(),
                config.cache_ttl_seconds
            ))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    cache
        .set_with_expiry(&city.cache_key(), config.cache_ttl_seconds, &serialized)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to store entry: {}", e))?;

    println!("{}", "✅ Stored in cache".green().bold());
    Ok(())
}

/// Pretty-prints a cached JSON document, or returns it unchanged if it is not JSON.
fn pretty(raw: &str) -> String {
    WeatherPayload::from_cached(raw)
        .ok()
        .and_then(|payload| serde_json::to_string_pretty(payload.as_value()).ok())
        .unwrap_or_else(|| raw.to_string())
}
