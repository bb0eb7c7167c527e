//! Google Gemini (Generative Language API) client.

use super::{ChatMessage, ChatModel, Role};
use crate::config::GenerationSettings;
use crate::error::{MedbotError, Result};
use crate::http::create_client;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Sampling parameters sent with each request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// A model listed by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-2.5-flash`.
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

// === Wire types ===

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Low-level Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    /// Create a client for the given API base URL.
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client(timeout)?,
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// List all models visible to this key, following pagination.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(format!("{}/models", self.api_base))
                .header("x-goog-api-key", &self.api_key)
                .query(&[("pageSize", "1000")]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            let page: ListModelsResponse = response.json().await?;
            models.extend(page.models);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} models", models.len());
        Ok(models)
    }

    /// Generate content and return the text of the first candidate.
    #[instrument(skip(self, messages, config), fields(model = %model, turns = messages.len()))]
    pub async fn generate_content(
        &self,
        model: &str,
        messages: &[ChatMessage],
        config: GenerationConfig,
    ) -> Result<String> {
        let request = build_request(messages, config);
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };

        let response = self
            .client
            .post(format!("{}/{}:generateContent", self.api_base, model_path))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body)
    }
}

fn build_request(messages: &[ChatMessage], config: GenerationConfig) -> GenerateContentRequest {
    let system_parts: Vec<Part> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| Part {
            text: Some(m.content.clone()),
        })
        .collect();

    let contents = messages
        .iter()
        .filter(|m| m.role == Role::Human)
        .map(|m| Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(m.content.clone()),
            }],
        })
        .collect();

    GenerateContentRequest {
        system_instruction: (!system_parts.is_empty()).then(|| Content {
            role: None,
            parts: system_parts,
        }),
        contents,
        generation_config: config,
    }
}

fn extract_text(body: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = body.candidates.into_iter().next() else {
        let reason = body
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(MedbotError::Generation(format!("Empty response: {}", reason)));
    };

    let text: String = candidate
        .content
        .unwrap_or_default()
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
        warn!(finish_reason = reason, "Candidate has no text, returning empty answer");
    }

    Ok(text)
}

async fn api_error(response: reqwest::Response) -> MedbotError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => match envelope.error.status {
            Some(s) => format!("{} ({}): {}", status, s, envelope.error.message),
            None => format!("{}: {}", status, envelope.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    };

    MedbotError::Generation(message)
}

/// Gemini-backed chat model with fixed model and sampling settings.
pub struct GeminiChatModel {
    client: GeminiClient,
    model: String,
    config: GenerationConfig,
}

impl GeminiChatModel {
    /// Build from generation settings and the API key.
    pub fn new(settings: &GenerationSettings, api_key: &str) -> Result<Self> {
        let client = GeminiClient::new(
            &settings.api_base,
            api_key,
            Duration::from_secs(settings.timeout_secs),
        )?;

        Ok(Self {
            client,
            model: settings.model.clone(),
            config: GenerationConfig {
                temperature: Some(settings.temperature),
                max_output_tokens: Some(settings.max_output_tokens),
            },
        })
    }
}

#[async_trait]
impl ChatModel for GeminiChatModel {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        self.client
            .generate_content(&self.model, messages, self.config)
            .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
