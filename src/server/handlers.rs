//! Route handlers.

use super::error::ApiError;
use super::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Deserialize)]
pub(super) struct ChatForm {
    msg: Option<String>,
}

pub(super) async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html.to_string())
}

pub(super) async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET|POST /get`: answer the `msg` field as plain text.
pub(super) async fn chat(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<String, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let msg = validate_message(form.msg, state.max_message_chars)?;

    let answer = tokio::time::timeout(state.request_timeout, async {
        let _permit = state
            .limiter
            .acquire()
            .await
            .map_err(|_| ApiError::ServiceUnavailable)?;
        state.chain.invoke(&msg).await.map_err(ApiError::from)
    })
    .await
    .map_err(|_| {
        warn!("Chat request exceeded {:?}", state.request_timeout);
        ApiError::Timeout
    })?;

    if let Err(e) = &answer {
        warn!("Chat request failed: {}", e);
    }
    answer
}

fn validate_message(msg: Option<String>, max_chars: usize) -> Result<String, ApiError> {
    let msg = msg.ok_or_else(|| ApiError::BadRequest("Missing form field: msg".to_string()))?;

    if msg.trim().is_empty() {
        return Err(ApiError::BadRequest("Form field msg is empty".to_string()));
    }

    let chars = msg.chars().count();
    if chars > max_chars {
        return Err(ApiError::PayloadTooLarge(format!(
            "Message is {} characters, limit is {}",
            chars, max_chars
        )));
    }

    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message() {
        assert!(matches!(validate_message(None, 10), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            validate_message(Some(" \n".to_string()), 10),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            validate_message(Some("a".repeat(11)), 10),
            Err(ApiError::PayloadTooLarge(_))
        ));
        assert_eq!(validate_message(Some("héllo".to_string()), 5).unwrap(), "héllo");
    }
}
