//! List indices tool handler

use super::handler::{McpToolHandler, ToolArguments};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use crate::mcp::response::{json_content, BackendOperation, BackendResultExt};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub const NAME: &str = "list_indices";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListIndicesArgs {}

impl ToolArguments for ListIndicesArgs {}

pub struct ListIndicesHandler {
    services: Arc<Services>,
}

impl ListIndicesHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for ListIndicesHandler {
    type Args = ListIndicesArgs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "List all indices in the Elasticsearch cluster with their stats \
                         (health, status, document count, store size)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn execute(&self, _args: ListIndicesArgs) -> Result<ToolResult, McpError> {
        let indices = self
            .services
            .backend
            .list_indices()
            .await
            .or_fail(BackendOperation::ListIndices)?;

        json_content(&indices)
    }
}
