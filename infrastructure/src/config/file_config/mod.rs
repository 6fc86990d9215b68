//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings.

mod api;
mod logging;
mod markers;

pub use api::FileApiConfig;
pub use logging::FileLoggingConfig;
pub use markers::FileMarkersConfig;

use super::error::ConfigError;
use notegpt_application::CompletionSettings;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint, model and credential
    pub api: FileApiConfig,
    /// Reply boundary markers
    pub markers: FileMarkersConfig,
    /// Session transcript
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check values that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.api.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api.endpoint",
                message: format!("'{}' is not an http(s) URL", self.api.endpoint),
            });
        }
        if self.api.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api.model",
                message: "model name is empty".to_string(),
            });
        }
        if self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "api.connect_timeout_seconds",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_completion_settings(&self) -> CompletionSettings {
        CompletionSettings::default()
            .with_endpoint(self.api.endpoint.trim())
            .with_model(self.api.model.trim())
            .with_markers(self.markers.to_markers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
endpoint = "http://localhost:8080/v1/chat/completions"
model = "llama3"

[markers]
user = "\n\n---\n\n"

[logging]
transcript = "/tmp/notegpt.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.logging.transcript.as_deref(),
            Some(std::path::Path::new("/tmp/notegpt.jsonl"))
        );

        let settings = config.to_completion_settings();
        assert_eq!(settings.endpoint, "http://localhost:8080/v1/chat/completions");
        assert_eq!(settings.model, "llama3");
        assert_eq!(settings.markers.user, "\n\n---\n\n");
        assert_eq!(settings.markers.assistant, "## Assistant:\n\n");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.api.endpoint = "api.openai.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "api.endpoint", .. })
        ));

        let mut config = FileConfig::default();
        config.api.model = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "api.model", .. })
        ));

        let mut config = FileConfig::default();
        config.api.connect_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
