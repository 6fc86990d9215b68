//! Infrastructure layer for notegpt
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credentials;
pub mod document;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileApiConfig, FileConfig, FileLoggingConfig, FileMarkersConfig,
};
pub use credentials::ConfigCredentialProvider;
pub use document::FileDocumentSink;
pub use http::{DEFAULT_CONNECT_TIMEOUT, ReqwestTransport, SseEventBuffer};
pub use logging::JsonlSessionLogger;
