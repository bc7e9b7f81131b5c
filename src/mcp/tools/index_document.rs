//! Index document tool handler

use super::handler::{require_index, McpToolHandler, ToolArguments};
use crate::core::backend::DocumentId;
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use crate::mcp::response::{json_content, BackendOperation, BackendResultExt};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

pub const NAME: &str = "index_document";

#[derive(Debug, Clone, Deserialize)]
pub struct IndexDocumentArgs {
    pub index: String,
    pub document: Map<String, Value>,
    #[serde(default)]
    pub id: Option<String>,
}

impl IndexDocumentArgs {
    pub fn document_id(&self) -> DocumentId {
        DocumentId::from(self.id.clone())
    }
}

impl ToolArguments for IndexDocumentArgs {
    fn validate(&self) -> Result<(), String> {
        require_index(&self.index)?;
        if self.document_id() == DocumentId::Empty {
            return Err(
                "id must not be empty; omit it to let Elasticsearch assign one".to_string(),
            );
        }
        Ok(())
    }
}

pub struct IndexDocumentHandler {
    services: Arc<Services>,
}

impl IndexDocumentHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for IndexDocumentHandler {
    type Args = IndexDocumentArgs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Index (create or replace) a document in an Elasticsearch index. \
                         The index is refreshed so the document is visible to the next search. \
                         Returns the backend write acknowledgment including the document _id."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "index": {
                        "type": "string",
                        "description": "Name of the index to write to"
                    },
                    "id": {
                        "type": "string",
                        "description": "Document ID. Omit to let Elasticsearch generate one; an existing ID is replaced"
                    },
                    "document": {
                        "type": "object",
                        "description": "Document body"
                    }
                },
                "required": ["index", "document"]
            }),
        }
    }

    async fn execute(&self, args: IndexDocumentArgs) -> Result<ToolResult, McpError> {
        let id = args.document_id();
        debug!("Indexing document into '{}' ({:?})", args.index, id);

        let ack = self
            .services
            .backend
            .index_document(&args.index, &id, &args.document)
            .await
            .or_fail(BackendOperation::IndexDocument)?;

        json_content(&ack)
    }
}
