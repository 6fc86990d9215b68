//! Credential provider backed by the loaded configuration

use crate::config::FileApiConfig;
use notegpt_application::ports::credentials::CredentialProvider;
use tracing::debug;

/// Resolves the API key from `[api] api_key`, falling back to the
/// environment variable named by `[api] api_key_env`.
///
/// The environment variable is read on every call so a key exported after
/// startup is still picked up.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    api_key: Option<String>,
    api_key_env: String,
}

impl ConfigCredentialProvider {
    pub fn new(api_key: Option<String>, api_key_env: impl Into<String>) -> Self {
        Self {
            api_key,
            api_key_env: api_key_env.into(),
        }
    }

    pub fn from_config(api: &FileApiConfig) -> Self {
        Self::new(api.api_key.clone(), api.api_key_env.clone())
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CredentialProvider for ConfigCredentialProvider {
    fn api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.clone().and_then(non_blank) {
            return Some(key);
        }
        if self.api_key_env.is_empty() {
            return None;
        }
        let key = std::env::var(&self.api_key_env).ok().and_then(non_blank);
        if key.is_some() {
            debug!("Using API key from ${}", self.api_key_env);
        }
        key
    }
}
