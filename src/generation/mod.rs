//! Text generation through a hosted LLM.

mod gemini;

pub use gemini::{GeminiChatModel, GeminiClient, GenerationConfig, ModelInfo};

use crate::error::Result;
use async_trait::async_trait;

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    Human,
}

/// One turn of a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }
}

/// A chat model that turns a message list into plain text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a reply and return its text content.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
