//! Boundary markers written around a generated reply.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ASSISTANT_MARKER: &str = "## Assistant:\n\n";
pub const DEFAULT_USER_MARKER: &str = "\n\n<hr>\n\n## User:\n\n";

/// Delimiters separating the generated reply from the next user turn
/// (Value Object)
///
/// `assistant` is prepended to the first fragment of a reply; `user` is
/// appended once the stream terminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryMarkers {
    pub assistant: String,
    pub user: String,
}

impl BoundaryMarkers {
    pub fn new(assistant: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            assistant: assistant.into(),
            user: user.into(),
        }
    }
}

impl Default for BoundaryMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_ASSISTANT_MARKER, DEFAULT_USER_MARKER)
    }
}
