//! Tool handler trait and common types

use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Typed arguments of one tool
///
/// Decoding enforces presence and JSON types of the fields; `validate`
/// adds the checks serde cannot express.
pub trait ToolArguments: DeserializeOwned + Send {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Trait for MCP tool implementations
///
/// Each tool (search, create_index, ...) implements this trait to
/// provide its schema and execution logic. Arguments arrive already
/// decoded and validated, so `execute` only talks to the backend.
#[async_trait]
pub trait McpToolHandler: Send + Sync {
    type Args: ToolArguments;

    /// Tool name (e.g., "search")
    fn name(&self) -> &'static str;

    /// Tool schema for tools/list
    fn schema(&self) -> ToolSchema;

    /// Execute tool with validated arguments
    async fn execute(&self, args: Self::Args) -> Result<ToolResult, McpError>;
}

/// Decode and validate raw call arguments for `tool`
///
/// Missing arguments (`null`) are read as an empty object so tools
/// without required fields can be called bare.
pub fn parse_args<T: ToolArguments>(tool: &str, args: Value) -> Result<T, McpError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    let invalid = |msg: String| McpError::InvalidParams(format!("Invalid arguments for {tool}: {msg}"));

    let parsed: T = serde_json::from_value(args).map_err(|e| invalid(e.to_string()))?;
    parsed.validate().map_err(invalid)?;
    Ok(parsed)
}

/// Index names are required by every tool that takes one
pub fn require_index(index: &str) -> Result<(), String> {
    if index.trim().is_empty() {
        return Err("index must not be empty".to_string());
    }
    Ok(())
}
