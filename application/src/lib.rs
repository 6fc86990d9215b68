//! Application layer for notegpt
//!
//! This crate contains the streaming session use case, port definitions, and
//! completion settings. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CompletionSettings;
pub use ports::{
    credentials::{CredentialProvider, StaticCredentials},
    document_sink::{CursorPosition, DocumentSink, SinkError, move_cursor_to_end},
    notification::{NoNotification, NotificationChannel},
    session_logger::{NoSessionLogger, SessionLogEvent, SessionLogger},
    session_observer::{NoSessionObserver, SessionObserver},
    transport::{
        FramePublisher, FrameSubscription, HttpMethod, Transport, TransportError,
        TransportEvent, TransportRequest,
    },
};
pub use use_cases::stream_session::{
    NO_ACTIVE_FILE_NOTICE, NO_API_KEY_NOTICE, SessionEnd, SessionError, SessionReport,
    StreamSession, StreamSessionUseCase,
};
