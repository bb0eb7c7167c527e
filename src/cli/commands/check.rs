//! Check command - verify that the Gemini API key works.
//!
//! Lists the models the key can use for content generation, then makes one
//! test generation call.

use crate::cli::Output;
use crate::config::{mask_key, Settings, GOOGLE_API_KEY};
use crate::error::Result;
use crate::generation::{ChatMessage, GeminiClient, GenerationConfig};
use console::style;
use std::time::Duration;

/// Run the API key diagnostic, exiting with status 1 on failure.
pub async fn run_check(settings: &Settings) -> anyhow::Result<()> {
    let key = std::env::var(GOOGLE_API_KEY)
        .ok()
        .filter(|k| !k.trim().is_empty());

    if !check_api_key(settings, key).await {
        std::process::exit(1);
    }
    Ok(())
}

/// Run every check and report the outcome. Returns `true` when the key is valid.
pub async fn check_api_key(settings: &Settings, api_key: Option<String>) -> bool {
    Output::banner("TESTING GOOGLE GEMINI API KEY");

    let Some(api_key) = api_key else {
        Output::error(&format!("ERROR: {} not found in environment or .env file", GOOGLE_API_KEY));
        return false;
    };
    Output::success(&format!("API key found: {}", mask_key(&api_key)));

    match diagnose(settings, &api_key).await {
        Ok(()) => {
            println!();
            Output::banner("API KEY IS VALID! ✓");
            true
        }
        Err(e) => {
            Output::error(&format!("ERROR: {}: {}", e.kind(), e));
            false
        }
    }
}

async fn diagnose(settings: &Settings, api_key: &str) -> Result<()> {
    let client = GeminiClient::new(
        &settings.generation.api_base,
        api_key,
        Duration::from_secs(settings.generation.timeout_secs),
    )?;
    Output::success("Gemini client configured");

    println!("\n{}", style("Available models:").bold());
    let models = client.list_models().await?;
    for model in models.iter().filter(|m| m.supports_generate_content()) {
        Output::list_item(&model.name);
    }

    let model = settings.diagnostics_model();
    println!();
    Output::banner(&format!("Testing with {}...", model));

    let spinner = Output::spinner("Waiting for response...");
    let result = client
        .generate_content(
            model,
            &[ChatMessage::human(settings.diagnostics.test_prompt.clone())],
            GenerationConfig {
                temperature: None,
                max_output_tokens: None,
            },
        )
        .await;
    spinner.finish_and_clear();

    let response = result?;
    Output::success("API test successful!");
    Output::kv("Response", response.trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_support::spawn;
    use axum::{
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    fn invalid_key() -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}})),
        )
    }

    fn mock_gemini() -> Router {
        Router::new()
            .route(
                "/models",
                get(|headers: HeaderMap| async move {
                    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("good-key-123456") {
                        return invalid_key().into_response();
                    }
                    Json(json!({"models": [
                        {"name": "models/gemini-2.5-flash", "supportedGenerationMethods": ["generateContent"]},
                        {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}
                    ]}))
                    .into_response()
                }),
            )
            .route(
                "/models/{action}",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("good-key-123456") {
                        return invalid_key().into_response();
                    }
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "What is AI in one sentence?");
                    assert!(body.get("systemInstruction").is_none());
                    Json(json!({"candidates": [{"content": {"parts": [{"text": "AI is machines doing tasks that need intelligence."}]}}]}))
                        .into_response()
                }),
            )
    }

    async fn settings() -> Settings {
        let base = spawn(mock_gemini()).await;
        let mut settings = Settings::default();
        settings.generation.api_base = base;
        settings.generation.timeout_secs = 5;
        settings
    }

    #[tokio::test]
    async fn test_valid_key_passes() {
        let settings = settings().await;
        assert!(check_api_key(&settings, Some("good-key-123456".to_string())).await);
    }

    #[tokio::test]
    async fn test_invalid_key_fails() {
        let settings = settings().await;
        assert!(!check_api_key(&settings, Some("bad-key-000000".to_string())).await);
    }

    #[tokio::test]
    async fn test_missing_key_fails() {
        let settings = settings().await;
        assert!(!check_api_key(&settings, None).await);
    }

    #[tokio::test]
    async fn test_unreachable_api_fails() {
        let mut settings = Settings::default();
        settings.generation.api_base = "http://127.0.0.1:1".to_string();
        settings.generation.timeout_secs = 2;
        assert!(!check_api_key(&settings, Some("good-key-123456".to_string())).await);
    }
}
