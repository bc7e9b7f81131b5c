//! MCP protocol method handlers

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use crate::mcp::resources::ResourceCatalog;
use crate::mcp::tools::ToolRegistry;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ProtocolHandlers {
    server_name: String,
    tool_registry: ToolRegistry,
    resources: ResourceCatalog,
}

impl ProtocolHandlers {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            server_name: services.config.server.name.clone(),
            tool_registry: ToolRegistry::new(Arc::clone(&services)),
            resources: ResourceCatalog::new(services),
        }
    }

    /// Route a request to its handler
    ///
    /// Notifications (no id) are handled but never answered.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let is_notification = request.id.is_none();
        let id = request.id.clone();

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "initialized" | "notifications/initialized" => {
                self.handle_initialized(request).await
            }
            "ping" => self.handle_ping(request).await,
            "tools/list" => self.handle_tools_list(request).await,
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => self.handle_resources_list(request).await,
            "resources/read" => self.handle_resources_read(request).await,
            other => Ok(JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {other}"),
            )),
        };

        if is_notification {
            return JsonRpcResponse::notification_ack();
        }
        response.unwrap_or_else(|e| JsonRpcResponse::error(id, e.code(), e.to_string()))
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: InitializeParams = match request.params {
            Some(Value::Null) | None => InitializeParams::default(),
            Some(p) => serde_json::from_value(p)
                .map_err(|e| McpError::InvalidParams(format!("Invalid initialize params: {e}")))?,
        };

        match &params.client_info {
            Some(client) => info!(
                "Client initialized: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            ),
            None => info!("Client initialized"),
        }

        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle initialized notification
    pub async fn handle_initialized(
        &self,
        _request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        info!("Client finished initialization");

        // Initialized is a notification, no response needed
        Ok(JsonRpcResponse::notification_ack())
    }

    /// Handle ping request
    pub async fn handle_ping(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        Ok(JsonRpcResponse::success(request.id, json!({})))
    }

    /// Handle tools/list request
    pub async fn handle_tools_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let tools = self.tool_registry.list();

        Ok(JsonRpcResponse::success(
            request.id,
            json!({ "tools": tools }),
        ))
    }

    /// Handle tools/call request
    pub async fn handle_tools_call(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: ToolCallParams = required_params(request.params)?;
        debug!("Calling tool '{}'", params.name);

        let result = self
            .tool_registry
            .call(&params.name, params.arguments)
            .await?;

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle resources/list request
    pub async fn handle_resources_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let resources = self.resources.list().await?;

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(ResourcesListResult { resources })?,
        ))
    }

    /// Handle resources/read request
    pub async fn handle_resources_read(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: ResourceReadParams = required_params(request.params)?;
        let result = self.resources.read(&params.uri).await?;

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }
}

fn required_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    let params = params.ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}
