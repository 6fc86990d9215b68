//! Application-level configuration.
//!
//! - [`CompletionSettings`]: endpoint, model and markers for streaming sessions

pub mod completion_settings;

pub use completion_settings::CompletionSettings;
