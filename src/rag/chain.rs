//! The retrieval chain.

use super::context::{format_documents, Retriever};
use super::prompt::ChatPromptTemplate;
use crate::error::Result;
use crate::generation::ChatModel;
use crate::vector_store::Document;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Retrieval → context → prompt → generation → text.
pub struct RagChain {
    retriever: Retriever,
    prompt: ChatPromptTemplate,
    model: Arc<dyn ChatModel>,
}

impl RagChain {
    pub fn new(
        retriever: Retriever,
        prompt: ChatPromptTemplate,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            retriever,
            prompt,
            model,
        }
    }

    /// Answer `input` using the retrieved context.
    ///
    /// An empty retrieval still goes to the model with an empty context.
    #[instrument(skip(self, input), fields(model = %self.model.model()))]
    pub async fn invoke(&self, input: &str) -> Result<String> {
        info!("Question: {}", input);

        let documents = self.retriever.retrieve(input).await?;
        let context = format_documents(&documents);
        debug!(
            documents = documents.len(),
            context_chars = context.len(),
            sources = ?documents.iter().filter_map(Document::source).collect::<Vec<_>>(),
            "Built context"
        );

        let messages = self.prompt.format_messages(&context, input);
        let answer = self.model.generate(&messages).await?;

        info!("Answer: {} chars", answer.len());
        Ok(answer)
    }
}
