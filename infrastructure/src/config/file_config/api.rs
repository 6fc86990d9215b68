//! Endpoint configuration from TOML (`[api]` section)

use notegpt_application::config::completion_settings::DEFAULT_ENDPOINT;
use notegpt_domain::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Direct API key (prefer `api_key_env` or `NOTEGPT_API__API_KEY`).
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is not set.
    pub api_key_env: String,
    /// Chat completions URL.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_seconds: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            connect_timeout_seconds: 30,
        }
    }
}
