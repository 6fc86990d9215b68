//! Domain layer for notegpt
//!
//! This crate contains the streaming core: decoding server-sent frames,
//! parsing chat-completion chunks and assembling them into document appends.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.

pub mod core;
pub mod session;
pub mod stream;

// Re-export commonly used types
pub use core::error::DecodeError;
pub use session::{
    entities::{Message, Role},
    phase::SessionPhase,
    request::{CompletionRequest, DEFAULT_MODEL, ResponseFormat},
};
pub use stream::{
    assembler::{AppendOp, SessionState, Step, StreamAssembler, StreamEvent},
    delta::{Delta, DeltaParser, ParsedCandidate, TERMINAL_SENTINEL},
    frame::{Candidates, DATA_LABEL, FrameDecoder},
    markers::{BoundaryMarkers, DEFAULT_ASSISTANT_MARKER, DEFAULT_USER_MARKER},
};
