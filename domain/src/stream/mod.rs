//! Streaming response decoding and assembly.
//!
//! ```text
//! raw frame ──► FrameDecoder ──► DeltaParser ──► StreamAssembler ──► AppendOp
//!              (0..n candidates) (delta/terminal)  (markers, state)
//! ```
//!
//! - [`frame::FrameDecoder`]: splits a raw frame into payload candidates
//! - [`delta::DeltaParser`]: parses one candidate into a delta or the terminal marker
//! - [`assembler::StreamAssembler`]: per-session transform producing append operations
//! - [`markers::BoundaryMarkers`]: delimiters written around a reply

pub mod assembler;
pub mod delta;
pub mod frame;
pub mod markers;
