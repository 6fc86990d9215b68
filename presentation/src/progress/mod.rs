//! Progress display for streaming sessions

pub mod reporter;
