//! Configuration loader for the `whoop-digest` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, fmt, net::SocketAddr, time::Duration};

use anyhow::{anyhow, Result};

use crate::whoop::RetryPolicy;

/// Parse an optional integer variable with a default value.
macro_rules! parse_env_u32 {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string variable.
macro_rules! require_env {
    ($lookup:expr, $var_name:expr) => {
        $lookup($var_name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

pub const DEFAULT_API_URL: &str = "https://api.prod.whoop.com/developer/v2";
pub const DEFAULT_OUTPUT_FOLDER: &str = "Health/WHOOP";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Clone)]
pub struct Config {
    // ---
    /// WHOOP API base URL.
    pub api_url: String,

    /// Bearer token handed over by the auth layer.
    pub access_token: String,

    /// Retries after a 429 before giving up.
    pub max_retries: u32,

    /// First backoff delay in milliseconds; doubled on each retry.
    pub initial_backoff_ms: u32,

    /// Folder prefix of every output key, without trailing slash.
    pub output_folder: String,

    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `WHOOP_ACCESS_TOKEN` – bearer token for the WHOOP API
///
/// Optional:
/// - `WHOOP_API_URL` – API base URL (default: WHOOP developer v2)
/// - `WHOOP_MAX_RETRIES` – retries after a 429 (default: 3)
/// - `WHOOP_INITIAL_BACKOFF_MS` – first backoff delay (default: 1000)
/// - `WHOOP_OUTPUT_FOLDER` – output key prefix (default: `Health/WHOOP`)
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    load_from(|name| env::var(name).ok())
}

/// Same as [`load_from_env`], reading variables through `lookup`.
pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    // ---
    let access_token = require_env!(lookup, "WHOOP_ACCESS_TOKEN");
    let api_url = lookup("WHOOP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let max_retries = parse_env_u32!(lookup, "WHOOP_MAX_RETRIES", 3);
    let initial_backoff_ms = parse_env_u32!(lookup, "WHOOP_INITIAL_BACKOFF_MS", 1000);

    let output_folder = lookup("WHOOP_OUTPUT_FOLDER")
        .map(|f| f.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_OUTPUT_FOLDER.to_string());

    let bind_addr = lookup("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| anyhow!("Invalid BIND_ADDR: {}", e))?;

    Ok(Config {
        api_url,
        access_token,
        max_retries,
        initial_backoff_ms,
        output_folder,
        bind_addr,
    })
}

/// First four characters of a long token, the rest starred out.
fn mask_token(token: &str) -> String {
    match token.get(..4) {
        Some(prefix) if token.len() > 8 => format!("{prefix}****"),
        _ => "****".to_string(),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("access_token", &mask_token(&self.access_token))
            .field("max_retries", &self.max_retries)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .field("output_folder", &self.output_folder)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Config {
    // ---
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(u64::from(self.initial_backoff_ms)),
        }
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the access token while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_token = mask_token(&self.access_token);

        tracing::info!("Configuration loaded:");
        tracing::info!("  WHOOP_API_URL            : {}", self.api_url);
        tracing::info!("  WHOOP_ACCESS_TOKEN       : {}", masked_token);
        tracing::info!("  WHOOP_MAX_RETRIES        : {}", self.max_retries);
        tracing::info!("  WHOOP_INITIAL_BACKOFF_MS : {}", self.initial_backoff_ms);
        tracing::info!("  WHOOP_OUTPUT_FOLDER      : {}", self.output_folder);
        tracing::info!("  BIND_ADDR                : {}", self.bind_addr);
    }
}
