//! Settings consumed by the streaming session use case.

use notegpt_domain::{BoundaryMarkers, DEFAULT_MODEL};

/// Chat completions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// How a streaming session talks to the endpoint and decorates the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    /// Full URL of the chat completions endpoint
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Delimiters written around the reply
    pub markers: BoundaryMarkers,
}

impl CompletionSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_markers(mut self, markers: BoundaryMarkers) -> Self {
        self.markers = markers;
        self
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            markers: BoundaryMarkers::default(),
        }
    }
}
