//! CLI command implementations.

mod check;
mod config;
mod serve;

pub use check::{check_api_key, run_check};
pub use config::run_config;
pub use serve::run_serve;
