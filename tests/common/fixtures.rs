// In-memory search backend used by the MCP tests

use async_trait::async_trait;
use es_mcp::core::backend::{DocumentId, IndexInfo, SearchBackend};
use es_mcp::core::error::{EsError, Result};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct MockIndex {
    name: String,
    mappings: Map<String, Value>,
    settings: Map<String, Value>,
    documents: Vec<(String, Map<String, Value>)>,
}

/// Backend keeping indices in memory, in creation order
///
/// Search behaves like `match_all`: every document of the index is a
/// hit. Writes are visible immediately, like `refresh=true`.
#[derive(Default)]
pub struct MockBackend {
    indices: Mutex<Vec<MockIndex>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
    offline: Mutex<Option<String>>,
    last_search_body: Mutex<Option<Value>>,
}

#[allow(dead_code)] // Not every test binary uses every helper
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with empty indices
    pub fn with_indices(names: &[&str]) -> Self {
        let backend = Self::new();
        {
            let mut indices = backend.indices.lock().unwrap();
            for name in names {
                indices.push(MockIndex {
                    name: name.to_string(),
                    ..Default::default()
                });
            }
        }
        backend
    }

    /// Make every following call fail as if the cluster were unreachable
    pub fn go_offline(&self, message: &str) {
        *self.offline.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_mappings(&self, index: &str, mappings: Value) {
        let mut indices = self.indices.lock().unwrap();
        let entry = indices
            .iter_mut()
            .find(|i| i.name == index)
            .expect("index exists");
        entry.mappings = mappings.as_object().cloned().unwrap_or_default();
    }

    pub fn settings(&self, index: &str) -> Option<Map<String, Value>> {
        let indices = self.indices.lock().unwrap();
        indices.iter().find(|i| i.name == index).map(|i| i.settings.clone())
    }

    pub fn mappings(&self, index: &str) -> Option<Map<String, Value>> {
        let indices = self.indices.lock().unwrap();
        indices.iter().find(|i| i.name == index).map(|i| i.mappings.clone())
    }

    /// Number of backend operations attempted so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_search_body(&self) -> Option<Value> {
        self.last_search_body.lock().unwrap().clone()
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.offline.lock().unwrap().as_ref() {
            Some(message) => Err(EsError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

fn index_not_found(index: &str) -> EsError {
    EsError::Backend {
        status: 404,
        message: format!("index_not_found_exception: no such index [{index}]"),
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn list_indices(&self) -> Result<Vec<IndexInfo>> {
        self.enter()?;
        let indices = self.indices.lock().unwrap();
        Ok(indices
            .iter()
            .map(|i| {
                let mut info = IndexInfo::new(i.name.clone());
                info.stats.insert("health".into(), json!("green"));
                info.stats.insert("status".into(), json!("open"));
                info.stats
                    .insert("docs.count".into(), json!(i.documents.len().to_string()));
                info
            })
            .collect())
    }

    async fn get_mapping(&self, index: &str) -> Result<Value> {
        self.enter()?;
        let indices = self.indices.lock().unwrap();
        let entry = indices
            .iter()
            .find(|i| i.name == index)
            .ok_or_else(|| index_not_found(index))?;
        let mut envelope = Map::new();
        envelope.insert(index.to_string(), json!({ "mappings": entry.mappings }));
        Ok(Value::Object(envelope))
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Value> {
        self.enter()?;
        *self.last_search_body.lock().unwrap() = Some(body.clone());

        let indices = self.indices.lock().unwrap();
        let entry = indices
            .iter()
            .find(|i| i.name == index)
            .ok_or_else(|| index_not_found(index))?;

        let hits: Vec<Value> = entry
            .documents
            .iter()
            .map(|(id, source)| {
                json!({
                    "_index": index,
                    "_id": id,
                    "_score": 1.0,
                    "_source": source
                })
            })
            .collect();

        let max_score = if hits.is_empty() {
            Value::Null
        } else {
            json!(1.0)
        };

        Ok(json!({
            "took": 1,
            "timed_out": false,
            "_shards": { "total": 1, "successful": 1, "skipped": 0, "failed": 0 },
            "hits": {
                "total": { "value": hits.len(), "relation": "eq" },
                "max_score": max_score,
                "hits": hits
            }
        }))
    }

    async fn create_index(
        &self,
        index: &str,
        mappings: &Map<String, Value>,
        settings: &Map<String, Value>,
    ) -> Result<Value> {
        self.enter()?;
        let mut indices = self.indices.lock().unwrap();
        if indices.iter().any(|i| i.name == index) {
            return Err(EsError::Backend {
                status: 400,
                message: format!(
                    "resource_already_exists_exception: index [{index}] already exists"
                ),
            });
        }
        indices.push(MockIndex {
            name: index.to_string(),
            mappings: mappings.clone(),
            settings: settings.clone(),
            documents: Vec::new(),
        });
        Ok(json!({
            "acknowledged": true,
            "shards_acknowledged": true,
            "index": index
        }))
    }

    async fn index_document(
        &self,
        index: &str,
        id: &DocumentId,
        document: &Map<String, Value>,
    ) -> Result<Value> {
        self.enter()?;
        let id = match id {
            DocumentId::Provided(id) => id.clone(),
            DocumentId::Absent => format!("auto-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            DocumentId::Empty => {
                return Err(EsError::InvalidRequest("empty id".to_string()));
            }
        };

        let mut indices = self.indices.lock().unwrap();
        // Writing to a missing index creates it, as Elasticsearch does by default
        if !indices.iter().any(|i| i.name == index) {
            indices.push(MockIndex {
                name: index.to_string(),
                ..Default::default()
            });
        }
        let entry = indices
            .iter_mut()
            .find(|i| i.name == index)
            .expect("index was just ensured");

        let result = match entry.documents.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, existing)) => {
                *existing = document.clone();
                "updated"
            }
            None => {
                entry.documents.push((id.clone(), document.clone()));
                "created"
            }
        };

        Ok(json!({
            "_index": index,
            "_id": id,
            "_version": 1,
            "result": result,
            "forced_refresh": true
        }))
    }
}
