//! Vector store abstraction for medbot.
//!
//! Provides a trait-based interface over the index holding the medical passages.

mod pinecone;

pub use pinecone::PineconeVectorStore;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A passage stored in the vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Record ID in the index.
    pub id: String,
    /// Passage text.
    pub content: String,
    /// Remaining metadata stored alongside the passage (e.g. `source`, `page`).
    pub metadata: Map<String, Value>,
}

impl Document {
    /// Create a document without metadata.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// The `source` metadata field, if present.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").and_then(Value::as_str)
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document.
    pub document: Document,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return the `limit` documents most similar to the query, best first.
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>>;
}
