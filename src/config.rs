//! Configuration management for the marketboard service.
//!
//! Configuration lives in a single JSON file at `~/.marketboard/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables (MARKETBOARD_* prefix)
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `MARKETBOARD_BIND` → server.bind
//! - `MARKETBOARD_PORT` → server.port
//! - `MARKETBOARD_STOCKS_URL` → data.stocks_url
//! - `MARKETBOARD_TEMPLATES_URL` → data.templates_url
//! - `MARKETBOARD_SCREENERS_URL` → data.screeners_url

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".marketboard"),
        |dirs| dirs.home_dir().join(".marketboard"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Server Configuration
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address. Default: "127.0.0.1" (local only).
    /// Set to "0.0.0.0" for remote access.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    4460
}

// ============================================================================
// Data Provider Configuration
// ============================================================================

/// Upstream data provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Endpoint serving the stock batch for the heatmap
    #[serde(default = "default_stocks_url")]
    pub stocks_url: String,

    /// Endpoint serving the screener template catalog
    #[serde(default = "default_templates_url")]
    pub templates_url: String,

    /// Endpoint accepting screener creation payloads
    #[serde(default = "default_screeners_url")]
    pub screeners_url: String,

    /// Number of stock records requested per heatmap refresh
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stocks_url: default_stocks_url(),
            templates_url: default_templates_url(),
            screeners_url: default_screeners_url(),
            fetch_limit: default_fetch_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_stocks_url() -> String {
    "http://127.0.0.1:4400/api/v1/stocks".into()
}

fn default_templates_url() -> String {
    "http://127.0.0.1:4400/api/v1/screener-templates".into()
}

fn default_screeners_url() -> String {
    "http://127.0.0.1:4400/api/v1/screeners".into()
}

fn default_fetch_limit() -> usize {
    100
}

fn default_request_timeout_secs() -> u64 {
    10
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" for structured JSON, "pretty" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Top-level Configuration
// ============================================================================

/// Service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream data provider settings
    #[serde(default)]
    pub data: DataConfig,

    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {:?}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config at {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply MARKETBOARD_* environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = std::env::var("MARKETBOARD_BIND") {
            self.server.bind = bind;
        }
        if let Ok(port) = std::env::var("MARKETBOARD_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("MARKETBOARD_STOCKS_URL") {
            self.data.stocks_url = url;
        }
        if let Ok(url) = std::env::var("MARKETBOARD_TEMPLATES_URL") {
            self.data.templates_url = url;
        }
        if let Ok(url) = std::env::var("MARKETBOARD_SCREENERS_URL") {
            self.data.screeners_url = url;
        }
    }
}
