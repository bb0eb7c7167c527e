//! Configuration module for medbot.
//!
//! Handles loading settings, credentials and prompt templates.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{mask_key, Credentials, GOOGLE_API_KEY, HF_TOKEN, PINECONE_API_KEY};
pub use prompts::{Prompts, RagPrompts};
pub use settings::{
    DiagnosticsSettings, EmbeddingSettings, GenerationSettings, PromptSettings, ServerSettings,
    Settings, UiSettings, VectorStoreSettings,
};
