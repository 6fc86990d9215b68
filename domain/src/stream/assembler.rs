//! Per-session response assembly.
//!
//! [`StreamAssembler`] turns the parsed event sequence of one streaming
//! exchange into the text operations applied to the document:
//!
//! ```text
//! Delta("Hi")  ──► Continue(Some("## Assistant:\n\nHi"))   first fragment
//! Delta(" !")  ──► Continue(Some(" !"))
//! Terminal     ──► Terminated(Some("\n\n<hr>\n\n## User:\n\n"))
//! Delta("late")──► Terminated(None)                         ignored
//! ```
//!
//! End of stream is reported through [`Step::Terminated`] so the caller can
//! stop feeding frames without any out-of-band signal.
//!
//! The assembler also holds the in-memory mirror of the document. The mirror
//! is seeded from the sink on the first write of a session and extended in
//! memory afterwards, which is only valid while the session is the sole
//! writer.

use super::delta::Delta;
use super::markers::BoundaryMarkers;

/// Event fed to the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Delta(Delta),
    Terminal,
}

impl From<Delta> for StreamEvent {
    fn from(delta: Delta) -> Self {
        StreamEvent::Delta(delta)
    }
}

/// Text to append to the document, after which the cursor moves to its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOp {
    pub text: String,
}

impl AppendOp {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The stream is still open.
    Continue(Option<AppendOp>),
    /// The stream has ended; no further events will produce output.
    Terminated(Option<AppendOp>),
}

impl Step {
    pub fn append(&self) -> Option<&AppendOp> {
        match self {
            Step::Continue(op) | Step::Terminated(op) => op.as_ref(),
        }
    }

    pub fn into_append(self) -> Option<AppendOp> {
        match self {
            Step::Continue(op) | Step::Terminated(op) => op,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Step::Terminated(_))
    }
}

/// State of one streaming session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    is_first_fragment: bool,
    document: Option<String>,
    terminated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            is_first_fragment: true,
            document: None,
            terminated: false,
        }
    }

    pub fn is_first_fragment(&self) -> bool {
        self.is_first_fragment
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The mirrored document text, if it has been loaded this session.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful transform from stream events to append operations.
#[derive(Debug, Clone)]
pub struct StreamAssembler {
    markers: BoundaryMarkers,
    state: SessionState,
}

impl StreamAssembler {
    pub fn new(markers: BoundaryMarkers) -> Self {
        Self {
            markers,
            state: SessionState::new(),
        }
    }

    pub fn markers(&self) -> &BoundaryMarkers {
        &self.markers
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Discards all session state so the assembler can serve a new session.
    pub fn reset(&mut self) {
        self.state = SessionState::new();
    }

    pub fn apply(&mut self, event: StreamEvent) -> Step {
        if self.state.terminated {
            return Step::Terminated(None);
        }

        match event {
            StreamEvent::Delta(delta) => {
                let text = if self.state.is_first_fragment {
                    self.state.is_first_fragment = false;
                    format!("{}{}", self.markers.assistant, delta.text)
                } else {
                    delta.text
                };
                Step::Continue(Some(AppendOp { text }))
            }
            StreamEvent::Terminal => {
                self.state.terminated = true;
                self.state.is_first_fragment = true;
                Step::Terminated(Some(AppendOp::new(self.markers.user.clone())))
            }
        }
    }

    // ==================== Document Mirror ====================

    pub fn has_document(&self) -> bool {
        self.state.document.is_some()
    }

    /// Seeds the mirror with the document's current content.
    pub fn seed_document(&mut self, content: String) {
        self.state.document = Some(content);
    }

    /// Full document text after appending `op`, without committing it.
    pub fn document_with(&self, op: &AppendOp) -> String {
        let mut next = self.state.document.clone().unwrap_or_default();
        next.push_str(&op.text);
        next
    }

    /// Records `document` as written to the sink.
    pub fn commit_document(&mut self, document: String) {
        self.state.document = Some(document);
    }
}

impl Default for StreamAssembler {
    fn default() -> Self {
        Self::new(BoundaryMarkers::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::markers::DEFAULT_USER_MARKER;

    fn delta(text: &str) -> StreamEvent {
        StreamEvent::Delta(Delta::new(text))
    }

    fn appended(step: &Step) -> Option<&str> {
        step.append().map(|op| op.text.as_str())
    }

    #[test]
    fn test_first_fragment_gets_assistant_marker() {
        let mut assembler = StreamAssembler::default();
        let step = assembler.apply(delta("Hi"));
        assert_eq!(step, Step::Continue(Some(AppendOp::new("## Assistant:\n\nHi"))));
        assert!(!assembler.state().is_first_fragment());
    }

    #[test]
    fn test_later_fragments_pass_through() {
        let mut assembler = StreamAssembler::default();
        assembler.apply(delta("a"));
        for text in ["b", "c", "## not a marker"] {
            let step = assembler.apply(delta(text));
            assert_eq!(appended(&step), Some(text));
            assert!(!step.is_terminated());
        }
    }

    #[test]
    fn test_terminal_appends_user_marker_and_resets_first_flag() {
        let mut assembler = StreamAssembler::default();
        assembler.apply(delta("Hi"));
        let step = assembler.apply(StreamEvent::Terminal);
        assert!(step.is_terminated());
        assert_eq!(appended(&step), Some("\n\n<hr>\n\n## User:\n\n"));
        assert!(assembler.state().is_terminated());
        assert!(assembler.state().is_first_fragment());
    }

    #[test]
    fn test_delta_after_terminal_is_ignored() {
        let mut assembler = StreamAssembler::default();
        assembler.apply(StreamEvent::Terminal);
        assert_eq!(assembler.apply(delta("late")), Step::Terminated(None));
    }

    #[test]
    fn test_second_terminal_is_noop() {
        let mut assembler = StreamAssembler::default();
        let ops: Vec<_> = [StreamEvent::Terminal, StreamEvent::Terminal]
            .into_iter()
            .filter_map(|e| assembler.apply(e).into_append())
            .collect();
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn test_terminal_without_fragments_still_writes_user_marker() {
        let mut assembler = StreamAssembler::default();
        let step = assembler.apply(StreamEvent::Terminal);
        assert_eq!(appended(&step), Some(DEFAULT_USER_MARKER));
    }

    #[test]
    fn test_custom_markers() {
        let mut assembler = StreamAssembler::new(BoundaryMarkers::new(">> ", " <<"));
        assert_eq!(appended(&assembler.apply(delta("x"))), Some(">> x"));
        assert_eq!(appended(&assembler.apply(StreamEvent::Terminal)), Some(" <<"));
    }

    #[test]
    fn test_reset_starts_a_fresh_session() {
        let mut assembler = StreamAssembler::default();
        assembler.apply(delta("x"));
        assembler.seed_document("doc".to_string());
        assembler.apply(StreamEvent::Terminal);

        assembler.reset();
        assert_eq!(assembler.state(), &SessionState::new());
        let step = assembler.apply(delta("again"));
        assert_eq!(appended(&step), Some("## Assistant:\n\nagain"));
    }

    #[test]
    fn test_document_mirror() {
        let mut assembler = StreamAssembler::default();
        assert!(!assembler.has_document());

        assembler.seed_document("# Note\n".to_string());
        let next = assembler.document_with(&AppendOp::new("more"));
        assert_eq!(next, "# Note\nmore");
        // Not committed yet
        assert_eq!(assembler.state().document(), Some("# Note\n"));

        assembler.commit_document(next);
        assert_eq!(assembler.state().document(), Some("# Note\nmore"));
    }

    #[test]
    fn test_empty_document_counts_as_loaded() {
        let mut assembler = StreamAssembler::default();
        assembler.seed_document(String::new());
        assert!(assembler.has_document());
    }
}
