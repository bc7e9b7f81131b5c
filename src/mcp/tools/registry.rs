//! Tool registry for the fixed MCP tool set

use super::create_index::{self, CreateIndexArgs, CreateIndexHandler};
use super::handler::{parse_args, McpToolHandler};
use super::index_document::{self, IndexDocumentArgs, IndexDocumentHandler};
use super::list_indices::{self, ListIndicesArgs, ListIndicesHandler};
use super::search::{self, SearchArgs, SearchHandler};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A decoded tool call: the tool name selects the argument shape
#[derive(Debug, Clone)]
pub enum ToolInvocation {
    Search(SearchArgs),
    CreateIndex(CreateIndexArgs),
    ListIndices(ListIndicesArgs),
    IndexDocument(IndexDocumentArgs),
}

impl ToolInvocation {
    /// Resolve the tool name and validate its arguments
    ///
    /// Fails with `UnknownTool` or `InvalidParams` without touching the
    /// backend.
    pub fn parse(name: &str, args: Value) -> Result<Self, McpError> {
        match name {
            search::NAME => parse_args(name, args).map(Self::Search),
            create_index::NAME => parse_args(name, args).map(Self::CreateIndex),
            list_indices::NAME => parse_args(name, args).map(Self::ListIndices),
            index_document::NAME => parse_args(name, args).map(Self::IndexDocument),
            other => Err(McpError::UnknownTool(other.to_string())),
        }
    }
}

/// Registry for all available MCP tools
///
/// The tool set is closed, so handlers are held by value and
/// dispatched with a match rather than looked up dynamically.
pub struct ToolRegistry {
    search: SearchHandler,
    create_index: CreateIndexHandler,
    list_indices: ListIndicesHandler,
    index_document: IndexDocumentHandler,
}

impl ToolRegistry {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            search: SearchHandler::new(Arc::clone(&services)),
            create_index: CreateIndexHandler::new(Arc::clone(&services)),
            list_indices: ListIndicesHandler::new(Arc::clone(&services)),
            index_document: IndexDocumentHandler::new(services),
        }
    }

    /// List all tool schemas, in a stable order
    pub fn list(&self) -> Vec<ToolSchema> {
        vec![
            self.search.schema(),
            self.create_index.schema(),
            self.list_indices.schema(),
            self.index_document.schema(),
        ]
    }

    /// Validate and execute a named tool call
    pub async fn call(&self, name: &str, args: Value) -> Result<ToolResult, McpError> {
        match ToolInvocation::parse(name, args)? {
            ToolInvocation::Search(args) => run(&self.search, args).await,
            ToolInvocation::CreateIndex(args) => run(&self.create_index, args).await,
            ToolInvocation::ListIndices(args) => run(&self.list_indices, args).await,
            ToolInvocation::IndexDocument(args) => run(&self.index_document, args).await,
        }
    }
}

async fn run<H: McpToolHandler>(handler: &H, args: H::Args) -> Result<ToolResult, McpError> {
    debug!("Dispatching tool '{}'", handler.name());
    handler.execute(args).await
}
