//! Search backend contract
//!
//! The adapter only depends on this trait. `ElasticsearchClient` is the
//! production implementation; tests plug in an in-memory one.

use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One index as reported by the backend listing
///
/// Only the name is interpreted. Everything else (health, status,
/// docs.count, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub index: String,
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}

impl IndexInfo {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            stats: Map::new(),
        }
    }
}

/// Document id for writes
///
/// Keeps "not given" and "given as an empty string" apart so callers
/// decide explicitly what an empty id means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentId {
    /// Let the engine assign an id
    Absent,
    /// Explicitly empty
    Empty,
    Provided(String),
}

impl From<Option<String>> for DocumentId {
    fn from(id: Option<String>) -> Self {
        match id {
            None => DocumentId::Absent,
            Some(id) if id.is_empty() => DocumentId::Empty,
            Some(id) => DocumentId::Provided(id),
        }
    }
}

/// Operations the adapter needs from the search engine
///
/// Every method is exactly one backend round trip. Implementations own
/// timeouts and retries; callers never retry.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// List all indices with their stats, in backend order
    async fn list_indices(&self) -> Result<Vec<IndexInfo>>;

    /// Fetch the mapping envelope for one index (`{ "<index>": { "mappings": ... } }`)
    async fn get_mapping(&self, index: &str) -> Result<Value>;

    /// Run a search request body against an index, returning the full response
    async fn search(&self, index: &str, body: &Value) -> Result<Value>;

    /// Create an index with the given mappings and settings
    async fn create_index(
        &self,
        index: &str,
        mappings: &Map<String, Value>,
        settings: &Map<String, Value>,
    ) -> Result<Value>;

    /// Write or replace a document and make it visible to the next search
    async fn index_document(
        &self,
        index: &str,
        id: &DocumentId,
        document: &Map<String, Value>,
    ) -> Result<Value>;
}
