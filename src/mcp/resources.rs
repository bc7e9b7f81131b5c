//! Schema resource catalog
//!
//! Every index is exposed as one read-only resource,
//! `<resource base>/<index>/schema`, whose content is the index mapping.

use crate::core::error::EsError;
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ReadResourceResult, Resource, JSON_MIME_TYPE};
use crate::mcp::response::{json_resource, BackendOperation, BackendResultExt};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Final path segment of every schema resource URI
pub const SCHEMA_SEGMENT: &str = "schema";

/// Build the resource URI for an index
pub fn schema_uri(base: &Url, index: &str) -> Result<Url, McpError> {
    base.join(&format!("{}/{SCHEMA_SEGMENT}", urlencoding::encode(index)))
        .map_err(|e| McpError::InternalError(format!("cannot build URI for '{index}': {e}")))
}

/// Extract the index name from a schema resource URI
///
/// Only the shape of the path is checked: the last segment must be
/// `schema` and the one before it a non-empty index name.
pub fn index_from_uri(uri: &str) -> Result<String, McpError> {
    let invalid = |reason: &str| McpError::InvalidResourceUri(format!("{uri} ({reason})"));

    let url = Url::parse(uri).map_err(|e| invalid(&e.to_string()))?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [.., index, last] if *last == SCHEMA_SEGMENT => {
            if index.is_empty() {
                return Err(invalid("missing index name"));
            }
            urlencoding::decode(index)
                .map(|s| s.into_owned())
                .map_err(|_| invalid("index name is not valid UTF-8"))
        }
        _ => Err(invalid(&format!("expected <index>/{SCHEMA_SEGMENT}"))),
    }
}

pub struct ResourceCatalog {
    services: Arc<Services>,
}

impl ResourceCatalog {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    /// One resource per index, in the order the backend reports them
    pub async fn list(&self) -> Result<Vec<Resource>, McpError> {
        let indices = self
            .services
            .backend
            .list_indices()
            .await
            .or_fail(BackendOperation::ListResources)?;

        indices
            .iter()
            .map(|info| {
                let uri = schema_uri(&self.services.resource_base, &info.index)?;
                Ok(Resource {
                    uri: uri.to_string(),
                    mime_type: JSON_MIME_TYPE.to_string(),
                    name: format!("\"{}\" index schema", info.index),
                })
            })
            .collect()
    }

    /// Fetch the mapping of the index named by `uri`
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let index = index_from_uri(uri)?;
        debug!("Reading schema of index '{}'", index);

        let envelope = self
            .services
            .backend
            .get_mapping(&index)
            .await
            .or_fail(BackendOperation::ReadResource)?;

        let mapping = envelope
            .get(&index)
            .ok_or_else(|| {
                EsError::MalformedResponse(format!(
                    "mapping response has no entry for index '{index}'"
                ))
            })
            .or_fail(BackendOperation::ReadResource)?;

        Ok(ReadResourceResult {
            contents: vec![json_resource(uri, mapping)?],
        })
    }
}
