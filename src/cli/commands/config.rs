//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::{mask_key, Settings, GOOGLE_API_KEY, HF_TOKEN, PINECONE_API_KEY};
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: &Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", settings.to_toml()?);

            Output::header("Credentials");
            for key in [GOOGLE_API_KEY, PINECONE_API_KEY, HF_TOKEN] {
                let status = match std::env::var(key) {
                    Ok(v) if !v.trim().is_empty() => format!("set ({})", mask_key(&v)),
                    _ => "not set".to_string(),
                };
                Output::kv(key, &status);
            }
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_path_succeed() {
        let settings = Settings::default();
        assert!(run_config(&ConfigAction::Show, &settings).is_ok());
        assert!(run_config(&ConfigAction::Path, &settings).is_ok());
    }
}
