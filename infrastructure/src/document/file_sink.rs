//! Document sink backed by a file on disk

use async_trait::async_trait;
use notegpt_application::ports::document_sink::{CursorPosition, DocumentSink, SinkError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Writes the streamed reply into a text file.
///
/// A missing file is reported as [`SinkError::Unavailable`] rather than
/// created, matching an editor with no note open. The cursor has no on-disk
/// representation and is only tracked in memory.
pub struct FileDocumentSink {
    path: PathBuf,
    cursor: Mutex<Option<CursorPosition>>,
}

impl FileDocumentSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cursor: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last position set through [`DocumentSink::set_cursor`]
    pub fn cursor(&self) -> Option<CursorPosition> {
        self.cursor.lock().ok().and_then(|cursor| *cursor)
    }
}

fn sink_error(error: std::io::Error) -> SinkError {
    match error.kind() {
        ErrorKind::NotFound => SinkError::Unavailable,
        _ => SinkError::Io(error.to_string()),
    }
}

#[async_trait]
impl DocumentSink for FileDocumentSink {
    async fn read_all(&self) -> Result<String, SinkError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(sink_error)
    }

    async fn replace_all(&self, content: &str) -> Result<(), SinkError> {
        // Never recreate a document that went away mid-session
        let metadata = tokio::fs::metadata(&self.path).await.map_err(sink_error)?;
        if !metadata.is_file() {
            return Err(SinkError::Unavailable);
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(sink_error)?;
        debug!("Wrote {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }

    async fn line_count(&self) -> Result<usize, SinkError> {
        Ok(self.read_all().await?.split('\n').count())
    }

    async fn line(&self, index: usize) -> Result<String, SinkError> {
        self.read_all()
            .await?
            .split('\n')
            .nth(index)
            .map(str::to_string)
            .ok_or_else(|| SinkError::Io(format!("line {} is out of range", index)))
    }

    async fn set_cursor(&self, position: CursorPosition) -> Result<(), SinkError> {
        if let Ok(mut cursor) = self.cursor.lock() {
            *cursor = Some(position);
        }
        Ok(())
    }
}
