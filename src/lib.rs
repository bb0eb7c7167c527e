//! medbot - Medical RAG Chatbot
//!
//! A small web service that answers medical questions from a pre-built
//! vector index. Each question is embedded, the three closest passages are
//! fetched from Pinecone, and Gemini answers with those passages as context.
//!
//! # Architecture
//!
//! - `config` - Settings, credentials and prompt templates
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector index abstraction
//! - `generation` - LLM chat models
//! - `rag` - The retrieval chain
//! - `server` - HTTP routes and shared application state
//! - `cli` - Command-line entry points
//!
//! # Example
//!
//! ```rust,no_run
//! use medbot::config::{Credentials, Settings};
//! use medbot::server::{router, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let state = Arc::new(AppState::build(&settings, &credentials)?);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod http;
pub mod rag;
pub mod server;
pub mod vector_store;

#[cfg(test)]
mod testing;

pub use error::{MedbotError, Result};
