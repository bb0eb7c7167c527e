//! Two-turn chat prompt template.

use crate::config::{Prompts, RagPrompts};
use crate::generation::ChatMessage;
use std::collections::HashMap;

/// System instruction plus human turn, filled per request.
#[derive(Debug, Clone)]
pub struct ChatPromptTemplate {
    system: String,
    human: String,
}

impl ChatPromptTemplate {
    pub fn new(system: impl Into<String>, human: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            human: human.into(),
        }
    }

    /// Fill `{{context}}` and `{{input}}` and return the message list.
    pub fn format_messages(&self, context: &str, input: &str) -> Vec<ChatMessage> {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("input".to_string(), input.to_string());

        vec![
            ChatMessage::system(Prompts::render(&self.system, &vars)),
            ChatMessage::human(Prompts::render(&self.human, &vars)),
        ]
    }
}

impl From<&RagPrompts> for ChatPromptTemplate {
    fn from(prompts: &RagPrompts) -> Self {
        Self::new(prompts.system.clone(), prompts.human.clone())
    }
}

impl Default for ChatPromptTemplate {
    fn default() -> Self {
        Self::from(&RagPrompts::default())
    }
}
