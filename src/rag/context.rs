//! Retrieval and context formatting.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{Document, VectorStore};
use std::sync::Arc;
use tracing::debug;

/// Top-k similarity retriever over a vector store.
pub struct Retriever {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever returning three documents per query.
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
            top_k: 3,
        }
    }

    /// Set the number of documents returned per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Fetch the documents most similar to `query`, best first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        let query_embedding = self.embedder.embed(query).await?;

        let results = self.vector_store.search(&query_embedding, self.top_k).await?;
        debug!(
            documents = results.len(),
            scores = ?results.iter().map(|r| r.score).collect::<Vec<_>>(),
            "Retrieved documents"
        );

        Ok(results.into_iter().map(|r| r.document).collect())
    }
}

/// Join document contents with blank lines into one context string.
pub fn format_documents(docs: &[Document]) -> String {
    docs.iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_documents() {
        let docs = vec![
            Document::new("1", "First passage."),
            Document::new("2", "Second passage."),
        ];
        assert_eq!(format_documents(&docs), "First passage.\n\nSecond passage.");
    }

    #[test]
    fn test_format_no_documents_is_empty() {
        assert_eq!(format_documents(&[]), "");
    }
}
