//! Credential provider port
//!
//! Supplies the API key for the completion endpoint. Storage (config file,
//! environment, keychain) is the adapter's concern.

/// Source of the endpoint credential
pub trait CredentialProvider: Send + Sync {
    /// The API key, or `None` when none is configured.
    fn api_key(&self) -> Option<String>;
}

/// Provider holding a fixed key, for wiring tests and one-off invocations.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    api_key: Option<String>,
}

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    pub fn none() -> Self {
        Self { api_key: None }
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }
}
