//! Error types for medbot.

use thiserror::Error;

/// Library-level error type for medbot operations.
#[derive(Error, Debug)]
pub enum MedbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl MedbotError {
    /// Short name of the error kind, used in diagnostic output.
    pub fn kind(&self) -> &'static str {
        match self {
            MedbotError::Config(_) => "ConfigError",
            MedbotError::Embedding(_) => "EmbeddingError",
            MedbotError::VectorStore(_) => "VectorStoreError",
            MedbotError::Generation(_) => "GenerationError",
            MedbotError::InvalidInput(_) => "InvalidInput",
            MedbotError::Io(_) => "IoError",
            MedbotError::Json(_) => "JsonError",
            MedbotError::TomlParse(_) => "TomlParseError",
            MedbotError::Http(_) => "HttpError",
        }
    }
}

/// Result type alias for medbot operations.
pub type Result<T> = std::result::Result<T, MedbotError>;
