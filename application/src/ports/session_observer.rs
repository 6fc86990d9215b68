//! Session progress port
//!
//! Lets the presentation layer follow a streaming session (spinner, counters)
//! without the use case knowing how progress is displayed.

use notegpt_domain::SessionPhase;

/// Callback for progress updates during a streaming session
pub trait SessionObserver: Send + Sync {
    /// Called when the session enters a new phase
    fn on_phase(&self, _phase: SessionPhase) {}

    /// Called after a fragment has been written to the document
    fn on_fragment(&self, _text: &str) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoSessionObserver;

impl SessionObserver for NoSessionObserver {}
