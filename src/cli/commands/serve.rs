//! Serve command: run the chat web service.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::server::{router, AppState};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Run the HTTP chat server until Ctrl+C.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    serve(host, port, settings, Credentials::from_env(), shutdown_signal()).await
}

/// Start the server with already loaded credentials, stopping when `shutdown` resolves.
///
/// Nothing is bound when `credentials` is an error.
pub async fn serve<F>(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
    credentials: crate::error::Result<Credentials>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let credentials = match credentials {
        Ok(c) => c,
        Err(e) => {
            Output::error(&e.to_string());
            Output::info("Run 'medbot check' for detailed diagnostics.");
            return Err(e.into());
        }
    };
    Output::success("Google API key loaded");

    let state = Arc::new(AppState::build(&settings, &credentials)?);
    let app = router(state);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Medical Chatbot");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Index", &settings.vector_store.index_name);
    Output::kv("Model", &settings.generation.model);
    println!();
    println!("Endpoints:");
    Output::kv("Chat UI", "GET      /");
    Output::kv("Ask", "GET|POST /get (form field: msg)");
    Output::kv("Health", "GET      /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GOOGLE_API_KEY;
    use crate::error::MedbotError;

    async fn free_port() -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn test_missing_google_key_binds_nothing() {
        let port = free_port().await;

        let err = serve(
            Some("127.0.0.1".to_string()),
            Some(port),
            Settings::default(),
            Credentials::from_lookup(|_| None),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MedbotError>(),
            Some(MedbotError::Config(_))
        ));
        // The port is still free, so no listener was created.
        tokio::net::TcpListener::bind(("127.0.0.1", port)).await.unwrap();
    }

    #[tokio::test]
    async fn test_serves_until_shutdown_with_key() {
        let port = free_port().await;
        let credentials = Credentials::from_lookup(|key| {
            (key == GOOGLE_API_KEY).then(|| "AIza-test".to_string())
        });

        serve(
            Some("127.0.0.1".to_string()),
            Some(port),
            Settings::default(),
            credentials,
            async {},
        )
        .await
        .unwrap();
    }
}
