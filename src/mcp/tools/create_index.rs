//! Create index tool handler

use super::handler::{require_index, McpToolHandler, ToolArguments};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use crate::mcp::response::{json_content, BackendOperation, BackendResultExt};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

pub const NAME: &str = "create_index";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIndexArgs {
    pub index: String,
    #[serde(default)]
    pub mappings: Map<String, Value>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl ToolArguments for CreateIndexArgs {
    fn validate(&self) -> Result<(), String> {
        require_index(&self.index)
    }
}

pub struct CreateIndexHandler {
    services: Arc<Services>,
}

impl CreateIndexHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for CreateIndexHandler {
    type Args = CreateIndexArgs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Create a new Elasticsearch index, optionally with field mappings and \
                         index settings. Returns the backend acknowledgment. \
                         Fails if the index already exists."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "index": {
                        "type": "string",
                        "description": "Name of the index to create"
                    },
                    "mappings": {
                        "type": "object",
                        "description": "Index mappings, e.g. {\"properties\": {\"title\": {\"type\": \"text\"}}}. Defaults to {}"
                    },
                    "settings": {
                        "type": "object",
                        "description": "Index settings, e.g. {\"number_of_shards\": 1}. Defaults to {}"
                    }
                },
                "required": ["index"]
            }),
        }
    }

    async fn execute(&self, args: CreateIndexArgs) -> Result<ToolResult, McpError> {
        info!("Creating index '{}'", args.index);

        let ack = self
            .services
            .backend
            .create_index(&args.index, &args.mappings, &args.settings)
            .await
            .or_fail(BackendOperation::CreateIndex)?;

        json_content(&ack)
    }
}
