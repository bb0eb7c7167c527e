//! Pinecone vector store client.
//!
//! Opens an existing index by name. The index is never created or written to.

use super::{Document, SearchResult, VectorStore};
use crate::config::VectorStoreSettings;
use crate::error::{MedbotError, Result};
use crate::http::{create_client, error_body};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

const API_VERSION: &str = "2024-07";

/// Handle to a pre-existing Pinecone index.
///
/// The data plane host is resolved on first use, so a missing API key only
/// fails once the index is actually contacted.
pub struct PineconeVectorStore {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    index_name: String,
    namespace: Option<String>,
    text_key: String,
    host: OnceCell<String>,
}

#[derive(Deserialize)]
struct IndexDescription {
    host: String,
    #[serde(default)]
    dimension: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

impl PineconeVectorStore {
    /// Create a handle for the index named in `settings`.
    pub fn from_existing_index(
        settings: &VectorStoreSettings,
        api_key: Option<String>,
    ) -> Result<Self> {
        let host = OnceCell::new();
        if let Some(h) = settings.host.as_deref().filter(|h| !h.is_empty()) {
            host.set(normalize_host(h))
                .map_err(|e| MedbotError::Config(e.to_string()))?;
        }

        Ok(Self {
            client: create_client(Duration::from_secs(settings.timeout_secs))?,
            api_key,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            index_name: settings.index_name.clone(),
            namespace: settings.namespace.clone().filter(|n| !n.is_empty()),
            text_key: settings.text_key.clone(),
            host,
        })
    }

    /// Name of the index this handle points at.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            MedbotError::VectorStore("PINECONE_API_KEY not set".to_string())
        })
    }

    /// Data plane URL of the index, looked up once.
    async fn host(&self) -> Result<&str> {
        self.host
            .get_or_try_init(|| self.describe_index())
            .await
            .map(String::as_str)
    }

    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn describe_index(&self) -> Result<String> {
        let url = format!("{}/indexes/{}", self.api_base, self.index_name);
        let response = self
            .client
            .get(&url)
            .header("Api-Key", self.api_key()?)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MedbotError::VectorStore(format!(
                "Failed to open index '{}': {}",
                self.index_name,
                error_body(response).await
            )));
        }

        let description: IndexDescription = response.json().await?;
        debug!(
            host = %description.host,
            dimension = ?description.dimension,
            "Resolved index host"
        );
        Ok(normalize_host(&description.host))
    }

    fn to_search_result(&self, m: Match) -> SearchResult {
        let mut metadata = m.metadata.unwrap_or_default();
        let content = match metadata.remove(&self.text_key) {
            Some(Value::String(text)) => text,
            _ => {
                warn!(id = %m.id, key = %self.text_key, "Match has no text metadata");
                String::new()
            }
        };

        SearchResult {
            document: Document {
                id: m.id,
                content,
                metadata,
            },
            score: m.score,
        }
    }
}

#[async_trait]
impl VectorStore for PineconeVectorStore {
    #[instrument(skip(self, query_embedding), fields(index = %self.index_name))]
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let host = self.host().await?;
        let request = QueryRequest {
            vector: query_embedding,
            top_k: limit,
            include_metadata: true,
            include_values: false,
            namespace: self.namespace.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/query", host))
            .header("Api-Key", self.api_key()?)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MedbotError::VectorStore(format!(
                "Query failed: {}",
                error_body(response).await
            )));
        }

        let body: QueryResponse = response.json().await?;
        debug!("Query returned {} matches", body.matches.len());

        Ok(body
            .matches
            .into_iter()
            .take(limit)
            .map(|m| self.to_search_result(m))
            .collect())
    }
}

/// Pinecone reports bare hostnames; prefix a scheme when missing.
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
