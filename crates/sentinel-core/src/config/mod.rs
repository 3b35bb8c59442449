//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: Hardcoded in struct `Default` implementations
//! 2. **Config file**: TOML file specified by `SENTINEL_CONFIG` env var
//! 3. **Environment variables**: `SENTINEL__*` env vars override specific fields
//!
//! # Configuration Sections
//!
//! - [`ServerConfig`]: HTTP server settings (bind address, body limit)
//! - [`UpstreamConfig`]: The JSON-RPC endpoint allowed requests are forwarded to
//! - [`FilterConfig`]: Denylisted methods and match policy
//! - [`LoggingConfig`]: Log level and format
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind_port = 8080
//!
//! [upstream]
//! url = "http://127.0.0.1:8545"
//! timeout_seconds = 5
//!
//! [filter]
//! denylist = ["eth_sendTransaction", "personal_sign"]
//! match_policy = "normalized"
//! ```

pub use crate::filter::FilterConfig;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// HTTP server configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind the server to. Defaults to `127.0.0.1`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number to listen on. Must be greater than 0. Defaults to `3030`.
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Upper bound on buffered request bodies. Unset means unbounded.
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3030
}

/// The endpoint allowed requests are forwarded to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// HTTP(S) URL of the JSON-RPC endpoint. Must start with `http`.
    pub url: String,

    /// Per-request timeout in seconds. Defaults to `5`.
    #[serde(default = "default_upstream_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_upstream_timeout_seconds() -> u64 {
    5
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Application logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "trace", "debug", "info", "warn", "error"). Defaults to `"info"`.
    pub level: String,

    /// Output format: `"json"` or `"pretty"`. Defaults to `"pretty"`.
    pub format: String,
}

/// Root application configuration.
///
/// Loaded with the `SENTINEL` prefix for environment overrides using `__` as a separator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment (e.g., "development", "production"). Defaults to `"development"`.
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Method denylist settings. The denylist itself has no default and must be configured.
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_body_bytes: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            timeout_seconds: default_upstream_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            filter: FilterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// Environment variables with the `SENTINEL__` prefix can override any configuration value.
    /// Use `__` as a separator for nested fields (e.g., `SENTINEL__SERVER__BIND_PORT=8080`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_builder = Config::builder()
            .set_default("environment", "development")?
            .set_default("server.bind_address", "127.0.0.1")?
            .set_default("server.bind_port", 3030)?
            .set_default("upstream.url", "http://127.0.0.1:8545")?
            .set_default("upstream.timeout_seconds", 5)?
            .set_default("filter.require_api_key", false)?
            .set_default("filter.match_policy", "normalized")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("SENTINEL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("filter.denylist")
                    .try_parsing(true),
            )
            .build()?;

        config_builder.try_deserialize()
    }

    /// Loads configuration from `config/config.toml` with fallback to defaults.
    ///
    /// The config file path can be overridden using the `SENTINEL_CONFIG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("SENTINEL_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Returns the parsed socket address for the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error string if the address cannot be parsed into a valid [`SocketAddr`].
    ///
    /// [`SocketAddr`]: std::net::SocketAddr
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, String> {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
            .parse()
            .map_err(|_| {
                format!(
                    "Invalid socket address: {}:{}",
                    self.server.bind_address, self.server.bind_port
                )
            })
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// Checks include:
    /// - The denylist is non-empty and a required API key is present
    /// - The upstream URL is an `http`/`https` URL
    /// - Port, upstream timeout and body limit are greater than zero
    /// - Logging format is either `"json"` or `"pretty"`
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        self.filter.validate().map_err(|e| format!("Invalid filter configuration: {e}"))?;

        if self.upstream.url.is_empty() {
            return Err("Empty upstream URL".to_string());
        }
        if !self.upstream.url.starts_with("http") {
            return Err(format!("Invalid upstream URL: {}", self.upstream.url));
        }

        if self.upstream.timeout_seconds == 0 {
            return Err("Upstream timeout must be greater than 0".to_string());
        }

        if self.server.bind_port == 0 {
            return Err("Bind port must be greater than 0".to_string());
        }

        if self.server.max_body_bytes == Some(0) {
            return Err("Max body bytes must be greater than 0 when set".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }
}
