//! Chat completion request body.
//!
//! [`CompletionRequest`] is the JSON document POSTed to a
//! `/chat/completions` endpoint. Streaming is always requested; the
//! response is consumed by the [`stream`](crate::stream) decoders.

use super::entities::Message;
use serde::{Deserialize, Serialize};

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Requested response format (`{"type": "text"}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn text() -> Self {
        Self {
            format_type: "text".to_string(),
        }
    }
}

/// Streaming chat completion request (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    /// Creates a streaming request for `model` carrying `messages` in order.
    pub fn streaming(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
            response_format: ResponseFormat::text(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
