//! Core domain logic (protocol-agnostic)
//!
//! This module contains everything that is independent of the MCP
//! transport: talking to Elasticsearch and the configuration around it.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **endpoint**: Endpoint URL parsing and resource base derivation
//! - **backend**: The `SearchBackend` contract
//! - **elasticsearch**: HTTP implementation of the contract
//! - **services**: Unified service container

pub mod backend;
pub mod config;
pub mod elasticsearch;
pub mod endpoint;
pub mod error;
pub mod services;

// Re-export key types for convenience
pub use backend::{DocumentId, IndexInfo, SearchBackend};
pub use config::Config;
pub use endpoint::Endpoint;
pub use error::{EsError, Result};
pub use services::Services;
