//! HTTP streaming adapter
//!
//! Implements the [`Transport`](notegpt_application::ports::transport::Transport)
//! port over HTTP with server-sent events.

mod event_buffer;
mod transport;

pub use event_buffer::SseEventBuffer;
pub use transport::{DEFAULT_CONNECT_TIMEOUT, ReqwestTransport};
