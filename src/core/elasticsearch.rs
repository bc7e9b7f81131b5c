//! Elasticsearch REST client
//!
//! Thin `reqwest` wrapper implementing [`SearchBackend`] against the
//! Elasticsearch HTTP API. One method, one request: no retries and no
//! caching. The per-request timeout comes from configuration.

use crate::core::backend::{DocumentId, IndexInfo, SearchBackend};
use crate::core::config::BackendConfig;
use crate::core::endpoint::Endpoint;
use crate::core::error::{EsError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub struct ElasticsearchClient {
    http: Client,
    base: Url,
    basic_auth: Option<(String, Option<String>)>,
    api_key: Option<String>,
}

impl ElasticsearchClient {
    /// Build a client for the given endpoint
    pub fn new(endpoint: &Endpoint, config: &BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(concat!("es-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EsError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        info!("Elasticsearch client targeting {}", endpoint.url());

        Ok(Self {
            http,
            base: endpoint.url().clone(),
            basic_auth: endpoint
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.map(str::to_string))),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| EsError::InvalidEndpoint(format!("cannot build '{path}': {e}")))
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        debug!("{} {}", method, url.path());

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("ApiKey {key}"));
        } else if let Some((user, pass)) = &self.basic_auth {
            request = request.basic_auth(user, pass.as_deref());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!("{} {} returned {}: {}", method, url.path(), status, message);
            return Err(EsError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| EsError::MalformedResponse(e.to_string()))
    }
}

/// Extract a readable message from an Elasticsearch error body
///
/// Handles the structured envelope (`{"error": {"type", "reason"}}`),
/// the bare string form (`{"error": "..."}`) and non-JSON bodies.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("error") {
            Some(Value::Object(err)) => {
                let kind = err.get("type").and_then(Value::as_str);
                let reason = err.get("reason").and_then(Value::as_str);
                match (kind, reason) {
                    (Some(kind), Some(reason)) => return format!("{kind}: {reason}"),
                    (None, Some(reason)) => return reason.to_string(),
                    (Some(kind), None) => return kind.to_string(),
                    (None, None) => {}
                }
            }
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            _ => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    async fn list_indices(&self) -> Result<Vec<IndexInfo>> {
        let mut url = self.url("_cat/indices")?;
        url.query_pairs_mut().append_pair("format", "json");

        let value = self.send(Method::GET, url, None).await?;
        serde_json::from_value(value)
            .map_err(|e| EsError::MalformedResponse(format!("index listing: {e}")))
    }

    async fn get_mapping(&self, index: &str) -> Result<Value> {
        let url = self.url(&format!("{}/_mapping", segment(index)))?;
        self.send(Method::GET, url, None).await
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Value> {
        let url = self.url(&format!("{}/_search", segment(index)))?;
        self.send(Method::POST, url, Some(body)).await
    }

    async fn create_index(
        &self,
        index: &str,
        mappings: &Map<String, Value>,
        settings: &Map<String, Value>,
    ) -> Result<Value> {
        let url = self.url(&segment(index))?;
        let body = json!({
            "mappings": mappings,
            "settings": settings,
        });
        self.send(Method::PUT, url, Some(&body)).await
    }

    async fn index_document(
        &self,
        index: &str,
        id: &DocumentId,
        document: &Map<String, Value>,
    ) -> Result<Value> {
        let (method, path) = match id {
            DocumentId::Provided(id) => (
                Method::PUT,
                format!("{}/_doc/{}", segment(index), segment(id)),
            ),
            DocumentId::Absent => (Method::POST, format!("{}/_doc", segment(index))),
            DocumentId::Empty => {
                return Err(EsError::InvalidRequest(
                    "document id must not be empty".to_string(),
                ))
            }
        };

        let mut url = self.url(&path)?;
        url.query_pairs_mut().append_pair("refresh", "true");

        let body = Value::Object(document.clone());
        self.send(method, url, Some(&body)).await
    }
}
