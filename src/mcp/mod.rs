//! MCP (Model Context Protocol) server module
//!
//! This module implements a JSON-RPC 2.0 compliant MCP server that
//! exposes Elasticsearch indices as schema resources and its core
//! operations as tools.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod resources;
pub mod response;
pub mod server;
pub mod tools;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use resources::ResourceCatalog;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
