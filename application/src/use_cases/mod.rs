//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod stream_session;
