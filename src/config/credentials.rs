//! API credentials read from the environment.

use crate::error::{MedbotError, Result};
use std::fmt;

pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";
pub const HF_TOKEN: &str = "HF_TOKEN";

/// Secrets needed to reach the external services.
///
/// Only the generation key is required up front. A missing Pinecone key
/// surfaces on the first vector store call.
#[derive(Clone)]
pub struct Credentials {
    pub google_api_key: String,
    pub pinecone_api_key: Option<String>,
    pub hf_token: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let google_api_key = non_empty(GOOGLE_API_KEY).ok_or_else(|| {
            MedbotError::Config(format!(
                "{} not set. Add it to .env or export {}='...'",
                GOOGLE_API_KEY, GOOGLE_API_KEY
            ))
        })?;

        Ok(Self {
            google_api_key,
            pinecone_api_key: non_empty(PINECONE_API_KEY),
            hf_token: non_empty(HF_TOKEN),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("google_api_key", &mask_key(&self.google_api_key))
            .field("pinecone_api_key", &self.pinecone_api_key.as_deref().map(mask_key))
            .field("hf_token", &self.hf_token.as_deref().map(mask_key))
            .finish()
    }
}

/// Show only the leading characters of a secret.
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    if key.chars().count() > 8 {
        format!("{}...", prefix)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_google_key_is_config_error() {
        let result = Credentials::from_lookup(lookup(&[(PINECONE_API_KEY, "pc-key")]));
        assert!(matches!(result, Err(MedbotError::Config(_))));
    }

    #[test]
    fn test_empty_google_key_is_config_error() {
        let result = Credentials::from_lookup(lookup(&[(GOOGLE_API_KEY, "  ")]));
        assert!(matches!(result, Err(MedbotError::Config(_))));
    }

    #[test]
    fn test_pinecone_key_is_optional() {
        let creds = Credentials::from_lookup(lookup(&[(GOOGLE_API_KEY, "AIzaSyTest")])).unwrap();
        assert_eq!(creds.google_api_key, "AIzaSyTest");
        assert!(creds.pinecone_api_key.is_none());
        assert!(creds.hf_token.is_none());
    }

    #[test]
    fn test_gemini_alias_is_not_read() {
        let result = Credentials::from_lookup(lookup(&[("GEMINI_API_KEY", "AIzaSyTest")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_masks_secrets() {
        let creds = Credentials::from_lookup(lookup(&[
            (GOOGLE_API_KEY, "AIzaSyVerySecretValue"),
            (PINECONE_API_KEY, "pcsk_another_secret"),
        ]))
        .unwrap();
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("VerySecretValue"));
        assert!(!shown.contains("another_secret"));
        assert!(shown.contains("AIzaSyVe..."));
    }

    #[test]
    fn test_mask_short_key() {
        assert_eq!(mask_key("abc"), "***");
    }
}
