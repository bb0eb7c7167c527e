//! RAG (Retrieval-Augmented Generation) for question answering.
//!
//! The chain is strictly linear: retrieve, format context, fill the prompt,
//! generate, extract text. Nothing is cached between invocations.

mod chain;
pub mod context;
mod prompt;

pub use chain::RagChain;
pub use context::{format_documents, Retriever};
pub use prompt::ChatPromptTemplate;
