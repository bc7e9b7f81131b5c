//! MCP tool implementations
//!
//! This module contains the four tool handlers that expose
//! Elasticsearch operations to MCP clients.

pub mod create_index;
pub mod handler;
pub mod index_document;
pub mod list_indices;
pub mod registry;
pub mod search;

pub use create_index::CreateIndexHandler;
pub use handler::{McpToolHandler, ToolArguments};
pub use index_document::IndexDocumentHandler;
pub use list_indices::ListIndicesHandler;
pub use registry::{ToolInvocation, ToolRegistry};
pub use search::SearchHandler;
