//! Test doubles for the external services.

use crate::embedding::Embedder;
use crate::error::{MedbotError, Result};
use crate::generation::{ChatMessage, ChatModel};
use crate::vector_store::{Document, SearchResult, VectorStore};
use async_trait::async_trait;
use std::sync::Mutex;

/// Returns the same embedding for every input and records the inputs.
pub struct StaticEmbedder {
    embedding: Vec<f32>,
    inputs: Mutex<Vec<String>>,
}

impl StaticEmbedder {
    pub fn new(embedding: Vec<f32>) -> Self {
        Self {
            embedding,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(self.embedding.clone())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

/// Serves a fixed document list in order, truncated to the requested limit.
pub struct RecordingStore {
    documents: Option<Vec<Document>>,
    queries: Mutex<Vec<(Vec<f32>, usize)>>,
}

impl RecordingStore {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Some(documents),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A store whose every search fails.
    pub fn failing() -> Self {
        Self {
            documents: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn limits(&self) -> Vec<usize> {
        self.queries.lock().unwrap().iter().map(|(_, l)| *l).collect()
    }

    pub fn queries(&self) -> Vec<Vec<f32>> {
        self.queries.lock().unwrap().iter().map(|(q, _)| q.clone()).collect()
    }
}

#[async_trait]
impl VectorStore for RecordingStore {
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.queries
            .lock()
            .unwrap()
            .push((query_embedding.to_vec(), limit));

        let documents = self
            .documents
            .as_ref()
            .ok_or_else(|| MedbotError::VectorStore("index unavailable".to_string()))?;

        Ok(documents
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, doc)| SearchResult {
                document: doc.clone(),
                score: 1.0 - i as f32 * 0.1,
            })
            .collect())
    }
}

/// Replies with a fixed answer and records every prompt.
pub struct RecordingModel {
    answer: String,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl RecordingModel {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingModel {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        Ok(self.answer.clone())
    }

    fn model(&self) -> &str {
        "recording"
    }
}

/// Always fails, like an exhausted quota.
pub struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn generate(&self, _messages: &[ChatMessage]) -> Result<String> {
        Err(MedbotError::Generation("429 (RESOURCE_EXHAUSTED): quota exceeded".to_string()))
    }

    fn model(&self) -> &str {
        "failing"
    }
}

/// Sleeps before answering.
pub struct SlowModel(pub std::time::Duration);

#[async_trait]
impl ChatModel for SlowModel {
    async fn generate(&self, _messages: &[ChatMessage]) -> Result<String> {
        tokio::time::sleep(self.0).await;
        Ok("late".to_string())
    }

    fn model(&self) -> &str {
        "slow"
    }
}
