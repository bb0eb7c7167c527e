//! Standalone API key check. Takes no arguments.

use medbot::cli::{commands, init_tracing};
use medbot::config::{Settings, GOOGLE_API_KEY};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing(0);

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: {}: {}", e.kind(), e);
            return ExitCode::FAILURE;
        }
    };

    let key = std::env::var(GOOGLE_API_KEY)
        .ok()
        .filter(|k| !k.trim().is_empty());

    if commands::check_api_key(&settings, key).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
