//! HTTP chat service.
//!
//! All long-lived clients live in one [`AppState`] built at startup and shared
//! read-only across requests.

mod error;
mod handlers;

pub use error::ApiError;

use crate::config::{Credentials, Prompts, ServerSettings, Settings};
use crate::embedding::HuggingFaceEmbedder;
use crate::error::Result;
use crate::generation::GeminiChatModel;
use crate::rag::{ChatPromptTemplate, RagChain, Retriever};
use crate::vector_store::PineconeVectorStore;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Built-in chat page served at `/`.
pub const DEFAULT_CHAT_PAGE: &str = include_str!("../../templates/chat.html");

/// Shared application state.
pub struct AppState {
    chain: RagChain,
    index_html: Arc<str>,
    limiter: Semaphore,
    request_timeout: Duration,
    max_message_chars: usize,
}

impl AppState {
    /// Assemble state from an already built chain.
    pub fn new(chain: RagChain, index_html: impl Into<Arc<str>>, server: &ServerSettings) -> Self {
        Self {
            chain,
            index_html: index_html.into(),
            limiter: Semaphore::new(server.max_concurrent_requests),
            request_timeout: server.request_timeout(),
            max_message_chars: server.max_message_chars,
        }
    }

    /// Wire embedder, index handle, prompt and model from configuration.
    ///
    /// Makes no network calls; the index is contacted on the first question.
    pub fn build(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        let embedder = Arc::new(HuggingFaceEmbedder::new(
            &settings.embedding,
            credentials.hf_token.clone(),
        )?);

        let vector_store = Arc::new(PineconeVectorStore::from_existing_index(
            &settings.vector_store,
            credentials.pinecone_api_key.clone(),
        )?);

        let model = Arc::new(GeminiChatModel::new(
            &settings.generation,
            &credentials.google_api_key,
        )?);

        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        let retriever =
            Retriever::new(vector_store, embedder).with_top_k(settings.vector_store.top_k);
        let chain = RagChain::new(retriever, ChatPromptTemplate::from(&prompts.rag), model);

        let index_html = match &settings.ui.template_path {
            Some(path) => std::fs::read_to_string(Settings::expand_path(path))?,
            None => DEFAULT_CHAT_PAGE.to_string(),
        };

        info!(
            index = %settings.vector_store.index_name,
            model = %settings.generation.model,
            top_k = settings.vector_store.top_k,
            "Chat pipeline ready"
        );

        Ok(Self::new(chain, index_html, &settings.server))
    }
}

/// Create the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/get", get(handlers::chat).post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
