//! Error types and error handling for the es-mcp adapter.
//!
//! This module defines the error types used by the core (endpoint
//! parsing, configuration, backend client). Protocol-specific error
//! handling (JSON-RPC codes) lives in the MCP adapter.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, EsError>;

/// Main error type for the core
#[derive(Error, Debug)]
pub enum EsError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The request never produced an HTTP response (connect, TLS, timeout)
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl From<reqwest::Error> for EsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EsError::MalformedResponse(err.to_string())
        } else {
            EsError::Transport(err.to_string())
        }
    }
}
