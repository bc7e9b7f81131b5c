//! Unified service container for es-mcp
//!
//! Provides shared, read-only access to the backend client and the
//! values derived once at startup.

use crate::core::backend::SearchBackend;
use crate::core::config::Config;
use crate::core::endpoint::Endpoint;
use crate::core::elasticsearch::ElasticsearchClient;
use crate::core::error::Result;
use std::sync::Arc;
use url::Url;

/// Unified services container
///
/// Constructed once by the binary and shared by every request handler.
/// Nothing in here is mutated after construction.
#[derive(Clone)]
pub struct Services {
    /// Search engine client
    pub backend: Arc<dyn SearchBackend>,

    /// Base URI schema resources are resolved against
    pub resource_base: Arc<Url>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services around an already constructed backend
    pub fn new(backend: Arc<dyn SearchBackend>, resource_base: Url, config: Config) -> Self {
        Self {
            backend,
            resource_base: Arc::new(resource_base),
            config: Arc::new(config),
        }
    }

    /// Create services talking to a real Elasticsearch cluster
    pub fn connect(endpoint: &Endpoint, config: Config) -> Result<Self> {
        let client = ElasticsearchClient::new(endpoint, &config.backend)?;
        Ok(Self::new(
            Arc::new(client),
            endpoint.resource_base().clone(),
            config,
        ))
    }
}
