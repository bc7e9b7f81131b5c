//! Configuration management for the es-mcp adapter.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! The backend endpoint itself is not configured here: it is the
//! required positional argument of the binary.

use crate::core::error::{EsError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Reserved scheme used for schema resource URIs
pub const DEFAULT_RESOURCE_SCHEME: &str = "elasticsearch";

/// Config file looked up in the working directory when nothing else is given
pub const LOCAL_CONFIG_FILE: &str = "es-mcp.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Backend client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,

    /// Elasticsearch API key, sent as `Authorization: ApiKey <key>`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Skip TLS certificate verification (self-signed dev clusters)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// MCP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Name reported in the initialize handshake
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Scheme substituted into resource URIs
    #[serde(default = "default_resource_scheme")]
    pub resource_scheme: String,
}

// Default value functions
fn default_request_timeout() -> u64 {
    30
}

fn default_server_name() -> String {
    "es-mcp".to_string()
}

fn default_resource_scheme() -> String {
    DEFAULT_RESOURCE_SCHEME.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            request_timeout_sec: default_request_timeout(),
            api_key: None,
            accept_invalid_certs: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            resource_scheme: default_resource_scheme(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EsError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File lookup order:
    /// 1. `explicit` (the `--config` flag)
    /// 2. ES_MCP_CONFIG env var
    /// 3. ./es-mcp.toml
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::config_path(explicit) {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var("ES_MCP_CONFIG") {
            return Some(PathBuf::from(path));
        }
        let local = Path::new(LOCAL_CONFIG_FILE);
        local.exists().then(|| local.to_path_buf())
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(timeout) = env::var("ES_MCP_REQUEST_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.backend.request_timeout_sec = t;
            }
        }
        if let Ok(key) = env::var("ES_API_KEY") {
            if !key.is_empty() {
                self.backend.api_key = Some(key);
            }
        }
        if let Ok(flag) = env::var("ES_MCP_ACCEPT_INVALID_CERTS") {
            if let Ok(b) = flag.parse() {
                self.backend.accept_invalid_certs = b;
            }
        }
        if let Ok(scheme) = env::var("ES_MCP_RESOURCE_SCHEME") {
            self.server.resource_scheme = scheme;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.backend.request_timeout_sec == 0 {
            return Err(EsError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        // RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
        let scheme = &self.server.resource_scheme;
        let valid_scheme = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid_scheme {
            return Err(EsError::ConfigError(format!(
                "Invalid resource scheme: '{scheme}'"
            )));
        }
        if scheme == "http" || scheme == "https" {
            return Err(EsError::ConfigError(
                "Resource scheme must differ from the backend scheme".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Request timeout: {}s", self.backend.request_timeout_sec);
        tracing::info!(
            "  API key: {}",
            if self.backend.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        if self.backend.accept_invalid_certs {
            tracing::warn!("  TLS certificate verification disabled");
        }
        tracing::info!("  Resource scheme: {}", self.server.resource_scheme);
    }
}
