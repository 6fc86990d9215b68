//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod credentials;
pub mod document_sink;
pub mod notification;
pub mod session_logger;
pub mod session_observer;
pub mod transport;
