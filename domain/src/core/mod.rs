//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DecodeError`]: recoverable stream decoding errors

pub mod error;
