//! Domain error types

use thiserror::Error;

/// Errors produced while decoding a single stream candidate.
///
/// A decode error never ends a stream: the caller logs it and moves on to
/// the next candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Failed to parse stream payload: {error}\nRaw payload: {payload}")]
    InvalidPayload { error: String, payload: String },

    #[error("Endpoint reported an error: {0}")]
    Remote(String),
}

impl DecodeError {
    /// Check if the endpoint itself reported this error in-stream
    pub fn is_remote(&self) -> bool {
        matches!(self, DecodeError::Remote(_))
    }
}
