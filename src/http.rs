//! Shared HTTP client construction for outbound API calls.

use crate::error::{MedbotError, Result};
use std::time::Duration;

/// Create an HTTP client with the given request timeout.
///
/// Every outbound call carries a timeout so a hung upstream cannot hold a
/// request forever.
pub fn create_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("medbot/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| MedbotError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Turn a non-success response into an error message carrying the upstream body.
pub async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}
