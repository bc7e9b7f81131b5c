//! Response and error normalization
//!
//! Every resource and tool handler funnels its backend result through
//! here: successes become pretty-printed JSON text, failures become a
//! single `McpError::Backend` message prefixed with the operation that
//! failed.

use crate::core::error::EsError;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ContentBlock, ResourceContents, ToolResult, JSON_MIME_TYPE};
use serde::Serialize;
use tracing::warn;

/// Backend operations, named the way failures are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOperation {
    ListResources,
    ReadResource,
    Search,
    CreateIndex,
    ListIndices,
    IndexDocument,
}

impl BackendOperation {
    /// Prefix put in front of the underlying error message
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            BackendOperation::ListResources => "Failed to list resources",
            BackendOperation::ReadResource => "Failed to read resource",
            BackendOperation::Search => "Failed to search index",
            BackendOperation::CreateIndex => "Failed to create index",
            BackendOperation::ListIndices => "Failed to list indices",
            BackendOperation::IndexDocument => "Failed to index document",
        }
    }

    /// Rewrap a backend failure as a protocol error
    pub fn fail(self, err: EsError) -> McpError {
        let detail = err.to_string();
        let detail = if detail.trim().is_empty() {
            "Unknown error"
        } else {
            detail.as_str()
        };
        warn!("{}: {}", self.failure_prefix(), detail);
        McpError::Backend(format!("{}: {}", self.failure_prefix(), detail))
    }
}

/// `.or_fail(op)` on backend results
pub trait BackendResultExt<T> {
    fn or_fail(self, op: BackendOperation) -> Result<T, McpError>;
}

impl<T> BackendResultExt<T> for Result<T, EsError> {
    fn or_fail(self, op: BackendOperation) -> Result<T, McpError> {
        self.map_err(|e| op.fail(e))
    }
}

/// Pretty-print any serializable value
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, McpError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Successful tool result carrying one pretty-printed JSON text block
pub fn json_content<T: Serialize + ?Sized>(value: &T) -> Result<ToolResult, McpError> {
    Ok(ToolResult {
        content: vec![ContentBlock::Text {
            text: pretty_json(value)?,
        }],
        is_error: false,
    })
}

/// Resource contents entry for a JSON document
pub fn json_resource<T: Serialize + ?Sized>(
    uri: &str,
    value: &T,
) -> Result<ResourceContents, McpError> {
    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: JSON_MIME_TYPE.to_string(),
        text: pretty_json(value)?,
    })
}
