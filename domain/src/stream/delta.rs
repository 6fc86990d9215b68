//! Candidate payload parsing.
//!
//! Each candidate is either the terminal sentinel or a JSON chunk envelope
//! whose text lives at `choices[0].delta.content`. Chunks without text
//! (role announcements, usage trailers) are legitimate control frames and
//! parse to [`ParsedCandidate::Control`].

use crate::core::error::DecodeError;
use serde::Deserialize;

/// Sentinel the producer sends once it has finished.
pub const TERMINAL_SENTINEL: &str = "[DONE]";

/// A non-terminal text fragment to append to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub text: String,
}

impl Delta {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Result of parsing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCandidate {
    /// A text fragment.
    Delta(Delta),
    /// The terminal sentinel.
    Terminal,
    /// A well-formed chunk that carries no text.
    Control,
}

#[derive(Debug, Deserialize)]
struct ChunkEnvelope {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ChunkError>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChunkError {
    #[serde(default)]
    message: Option<String>,
}

/// Parses candidates into deltas. Pure: never touches the sink or transport.
pub struct DeltaParser;

impl DeltaParser {
    pub fn parse(candidate: &str) -> Result<ParsedCandidate, DecodeError> {
        let candidate = candidate.trim();
        if candidate == TERMINAL_SENTINEL {
            return Ok(ParsedCandidate::Terminal);
        }

        let invalid = |error: String| DecodeError::InvalidPayload {
            error,
            payload: candidate.to_string(),
        };

        // Derived structs also accept sequences, so require an object first
        let value: serde_json::Value =
            serde_json::from_str(candidate).map_err(|e| invalid(e.to_string()))?;
        if !value.is_object() {
            return Err(invalid("payload is not a JSON object".to_string()));
        }
        let envelope: ChunkEnvelope =
            serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;

        if let Some(error) = envelope.error {
            let message = error
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(DecodeError::Remote(message));
        }

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|text| !text.is_empty());

        Ok(match content {
            Some(text) => ParsedCandidate::Delta(Delta { text }),
            None => ParsedCandidate::Control,
        })
    }
}
