//! Document sink port
//!
//! The document the reply is streamed into. The sink is owned by the host;
//! the application only reads it, rewrites it and moves its cursor.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a document sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// There is no document to write into.
    #[error("No active file")]
    Unavailable,

    #[error("Document I/O error: {0}")]
    Io(String),
}

/// Zero-based cursor position (line, column in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Host document the reply is written into.
///
/// There is no partial-write primitive: appending means writing the whole
/// new content with [`replace_all`](Self::replace_all). Lines are separated
/// by `\n`; a trailing newline yields an empty last line.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn read_all(&self) -> Result<String, SinkError>;

    async fn replace_all(&self, content: &str) -> Result<(), SinkError>;

    async fn line_count(&self) -> Result<usize, SinkError>;

    async fn line(&self, index: usize) -> Result<String, SinkError>;

    async fn set_cursor(&self, position: CursorPosition) -> Result<(), SinkError>;
}

/// Moves the cursor to the end of the last line and returns the new position.
pub async fn move_cursor_to_end(sink: &dyn DocumentSink) -> Result<CursorPosition, SinkError> {
    let count = sink.line_count().await?;
    let position = match count.checked_sub(1) {
        Some(last) => CursorPosition::new(last, sink.line(last).await?.chars().count()),
        None => CursorPosition::default(),
    };
    sink.set_cursor(position).await?;
    Ok(position)
}
