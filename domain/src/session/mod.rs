//! Completion session domain.
//!
//! - [`entities::Message`]: a single message sent to the endpoint
//! - [`request::CompletionRequest`]: the streaming request body
//! - [`phase::SessionPhase`]: lifecycle of one streaming exchange

pub mod entities;
pub mod phase;
pub mod request;
