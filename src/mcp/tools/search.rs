//! Search tool handler

use super::handler::{require_index, McpToolHandler, ToolArguments};
use crate::core::error::EsError;
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use crate::mcp::response::{json_content, BackendOperation, BackendResultExt};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

pub const NAME: &str = "search";

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub index: String,
    /// Query DSL object, sent as the `query` of the search body
    pub query: Map<String, Value>,
}

impl ToolArguments for SearchArgs {
    fn validate(&self) -> Result<(), String> {
        require_index(&self.index)
    }
}

pub struct SearchHandler {
    services: Arc<Services>,
}

impl SearchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for SearchHandler {
    type Args = SearchArgs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Search an Elasticsearch index with a Query DSL query. \
                         Returns the hits section of the response (total, max_score and the \
                         matching documents with their _id, _score and _source). \
                         Use list_indices or the index schema resources to discover index \
                         names and field types first."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "index": {
                        "type": "string",
                        "description": "Name of the index to search"
                    },
                    "query": {
                        "type": "object",
                        "description": "Query DSL object, e.g. {\"match\": {\"title\": \"rust\"}} or {\"match_all\": {}}"
                    }
                },
                "required": ["index", "query"]
            }),
        }
    }

    async fn execute(&self, args: SearchArgs) -> Result<ToolResult, McpError> {
        debug!("Searching index '{}'", args.index);

        let body = json!({ "query": args.query });
        let response = self
            .services
            .backend
            .search(&args.index, &body)
            .await
            .or_fail(BackendOperation::Search)?;

        let hits = response
            .get("hits")
            .ok_or_else(|| {
                EsError::MalformedResponse("search response has no hits section".to_string())
            })
            .or_fail(BackendOperation::Search)?;

        json_content(hits)
    }
}
