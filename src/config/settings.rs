//! Configuration settings for medbot.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub server: ServerSettings,
    pub embedding: EmbeddingSettings,
    pub vector_store: VectorStoreSettings,
    pub generation: GenerationSettings,
    pub diagnostics: DiagnosticsSettings,
    pub ui: UiSettings,
    pub prompts: PromptSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Upper bound on a single chat request, end to end.
    pub request_timeout_secs: u64,
    /// Maximum number of chain invocations running at once.
    pub max_concurrent_requests: usize,
    /// Longest accepted `msg` value, in characters.
    pub max_message_chars: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 60,
            max_concurrent_requests: 16,
            max_message_chars: 4000,
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Hugging Face model id used for sentence embeddings.
    pub model: String,
    /// Embedding dimensions (must match the index).
    pub dimensions: u32,
    /// Base URL of the inference endpoint.
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            api_base: "https://router.huggingface.co/hf-inference".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Name of the pre-existing Pinecone index.
    pub index_name: String,
    /// Number of documents retrieved per question.
    pub top_k: usize,
    /// Pinecone control plane URL, used to look up the index host.
    pub api_base: String,
    /// Data plane host of the index. Skips the lookup when set.
    pub host: Option<String>,
    /// Namespace inside the index.
    pub namespace: Option<String>,
    /// Metadata key holding the passage text.
    pub text_key: String,
    pub timeout_secs: u64,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            index_name: "medical-chatbot".to_string(),
            top_k: 3,
            api_base: "https://api.pinecone.io".to_string(),
            host: None,
            namespace: None,
            text_key: "text".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Generation (LLM) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Gemini model identifier.
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Base URL of the Generative Language API.
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
            max_output_tokens: 1024,
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Settings for the API key diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
    /// Model used for the test call. Falls back to `generation.model`.
    pub model: Option<String>,
    /// Prompt sent during the test call.
    pub test_prompt: String,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            model: None,
            test_prompt: "What is AI in one sentence?".to_string(),
        }
    }
}

/// Web UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct UiSettings {
    /// HTML page served at `/`. The built-in page is used when unset.
    pub template_path: Option<String>,
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::MedbotError;

        if self.vector_store.top_k == 0 {
            return Err(MedbotError::Config("vector_store.top_k must be at least 1".to_string()));
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(MedbotError::Config(
                "server.max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(MedbotError::Config(
                "server.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.server.max_message_chars == 0 {
            return Err(MedbotError::Config(
                "server.max_message_chars must be at least 1".to_string(),
            ));
        }
        if self.vector_store.index_name.trim().is_empty() {
            return Err(MedbotError::Config("vector_store.index_name is empty".to_string()));
        }

        for (name, value) in [
            ("embedding.api_base", &self.embedding.api_base),
            ("vector_store.api_base", &self.vector_store.api_base),
            ("generation.api_base", &self.generation.api_base),
        ] {
            url::Url::parse(value)
                .map_err(|e| MedbotError::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medbot")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Model used by the diagnostic, single-sourced from the generation model by default.
    pub fn diagnostics_model(&self) -> &str {
        self.diagnostics
            .model
            .as_deref()
            .unwrap_or(&self.generation.model)
    }

    /// Render the settings as TOML for display.
    pub fn to_toml(&self) -> crate::error::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::MedbotError::Config(e.to_string()))
    }
}
