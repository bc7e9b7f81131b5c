//! es-mcp - Elasticsearch over the Model Context Protocol
//!
//! A stdio MCP server that lets an automated client discover
//! Elasticsearch indices, read their mappings and search, create
//! indices and write documents.
//!
//! # Architecture
//!
//! The codebase is organized into two modules:
//!
//! - **core**: Backend access (protocol-agnostic)
//!   - config, error, endpoint
//!   - backend (the `SearchBackend` contract)
//!   - elasticsearch (reqwest implementation)
//!   - services (shared, read-only service container)
//!
//! - **mcp**: MCP adapter (depends on core)
//!   - server, transport, handlers, protocol
//!   - resources (index schema catalog)
//!   - tools (search, create_index, list_indices, index_document)
//!   - response (result and error normalization)

// Core domain logic (protocol-agnostic)
pub mod core;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{EsError, Result};
pub use core::services::Services;
pub use core::{DocumentId, Endpoint, IndexInfo, SearchBackend};
