//! Hugging Face inference embeddings.

use super::Embedder;
use crate::config::EmbeddingSettings;
use crate::error::{MedbotError, Result};
use crate::http::{create_client, error_body};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Embedder backed by the Hugging Face feature-extraction pipeline.
pub struct HuggingFaceEmbedder {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    dimensions: usize,
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [String],
}

impl HuggingFaceEmbedder {
    /// Create an embedder from settings and an optional access token.
    pub fn new(settings: &EmbeddingSettings, token: Option<String>) -> Result<Self> {
        let endpoint = format!(
            "{}/models/{}/pipeline/feature-extraction",
            settings.api_base.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            client: create_client(Duration::from_secs(settings.timeout_secs))?,
            endpoint,
            token,
            dimensions: settings.dimensions as usize,
        })
    }
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MedbotError::Embedding("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&FeatureExtractionRequest { inputs: texts });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MedbotError::Embedding(error_body(response).await));
        }

        let body: Value = response.json().await?;
        let embeddings = parse_embeddings(body)?;

        if embeddings.len() != texts.len() {
            return Err(MedbotError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        if let Some(bad) = embeddings.iter().find(|e| e.len() != self.dimensions) {
            return Err(MedbotError::Embedding(format!(
                "Expected {} dimensions, got {}",
                self.dimensions,
                bad.len()
            )));
        }

        debug!("Generated {} embeddings", embeddings.len());
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Parse a feature-extraction response.
///
/// Sentence-transformer models return one vector per input. Plain encoder
/// models return one vector per token, which is mean-pooled here.
fn parse_embeddings(body: Value) -> Result<Vec<Vec<f32>>> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(MedbotError::Embedding(format!(
                "Unexpected embedding response: {}",
                other
            )))
        }
    };

    items.into_iter().map(parse_single).collect()
}

fn parse_single(item: Value) -> Result<Vec<f32>> {
    let values = match item {
        Value::Array(values) => values,
        _ => return Err(MedbotError::Embedding("Embedding is not an array".to_string())),
    };

    match values.first() {
        Some(Value::Array(_)) => {
            let tokens = values
                .into_iter()
                .map(parse_vector)
                .collect::<Result<Vec<_>>>()?;
            Ok(mean_pool(&tokens))
        }
        _ => parse_vector(Value::Array(values)),
    }
}

fn parse_vector(value: Value) -> Result<Vec<f32>> {
    match value {
        Value::Array(values) => values
            .iter()
            .map(|v| {
                v.as_f64().map(|f| f as f32).ok_or_else(|| {
                    MedbotError::Embedding("Non-numeric embedding value".to_string())
                })
            })
            .collect(),
        _ => Err(MedbotError::Embedding("Embedding is not an array".to_string())),
    }
}

fn mean_pool(tokens: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = tokens.first() else {
        return Vec::new();
    };
    let mut sum = vec![0.0f32; first.len()];
    for token in tokens {
        for (acc, v) in sum.iter_mut().zip(token) {
            *acc += v;
        }
    }
    let n = tokens.len() as f32;
    sum.iter_mut().for_each(|v| *v /= n);
    sum
}
