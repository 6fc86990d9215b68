//! Port for structured session logging.
//!
//! Defines the [`SessionLogger`] trait for recording what happened during a
//! streaming session (request sent, undecodable payloads, how it ended) to a
//! machine-readable transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! per-session record (JSONL).

use serde_json::Value;

/// A structured session event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
pub struct SessionLogEvent {
    /// Event type identifier (e.g., "request_sent", "decode_error", "session_end").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SessionLogEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging session events to a structured log.
///
/// The `log` method is synchronous and non-fallible; a broken transcript
/// must never interrupt a stream.
pub trait SessionLogger: Send + Sync {
    fn log(&self, event: SessionLogEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoSessionLogger;

impl SessionLogger for NoSessionLogger {
    fn log(&self, _event: SessionLogEvent) {}
}
