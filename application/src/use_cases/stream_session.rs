//! Stream session use case
//!
//! Sends a conversation to the completion endpoint and streams the reply
//! into the active document.
//!
//! Each call to [`StreamSessionUseCase::start`] creates a fresh
//! [`StreamSession`] that owns the transport subscription and the assembler
//! state for that one exchange. Frames are processed strictly in arrival
//! order:
//!
//! ```text
//! frame ──► FrameDecoder ──► DeltaParser ──► StreamAssembler ──► sink append ──► cursor to end
//! ```

use crate::config::CompletionSettings;
use crate::ports::credentials::CredentialProvider;
use crate::ports::document_sink::{DocumentSink, SinkError, move_cursor_to_end};
use crate::ports::notification::NotificationChannel;
use crate::ports::session_logger::{NoSessionLogger, SessionLogEvent, SessionLogger};
use crate::ports::session_observer::{NoSessionObserver, SessionObserver};
use crate::ports::transport::{FrameSubscription, Transport, TransportEvent, TransportRequest};
use notegpt_domain::{
    AppendOp, BoundaryMarkers, CompletionRequest, DeltaParser, FrameDecoder, Message,
    ParsedCandidate, SessionPhase, StreamAssembler, StreamEvent,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Notice shown when no credential is configured
pub const NO_API_KEY_NOTICE: &str = "No API Key set";

/// Notice shown when there is no document to write into
pub const NO_ACTIVE_FILE_NOTICE: &str = "No active file";

/// Errors that prevent a session from running at all
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A streaming session is already active")]
    AlreadyActive,

    #[error("Failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// No API key was configured; nothing was sent.
    MissingCredential,
    /// The terminal marker was processed.
    Completed,
    /// The transport failed; the message describes the failure.
    TransportFailed(String),
    /// The transport finished without sending the terminal marker.
    Disconnected,
}

impl SessionEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEnd::MissingCredential => "missing_credential",
            SessionEnd::Completed => "completed",
            SessionEnd::TransportFailed(_) => "transport_failed",
            SessionEnd::Disconnected => "disconnected",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionEnd::Completed)
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub end: SessionEnd,
    /// Every phase the session went through, starting with `Idle`
    pub phases: Vec<SessionPhase>,
    /// Append operations written to the document
    pub appended: usize,
    /// Append operations lost because the document could not be written
    pub dropped: usize,
    /// Candidates skipped because they could not be decoded
    pub decode_errors: usize,
}

impl SessionReport {
    pub fn reached(&self, phase: SessionPhase) -> bool {
        self.phases.contains(&phase)
    }
}

/// Use case for streaming a completion into the active document
pub struct StreamSessionUseCase {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn DocumentSink>,
    credentials: Arc<dyn CredentialProvider>,
    notifier: Arc<dyn NotificationChannel>,
    observer: Arc<dyn SessionObserver>,
    logger: Arc<dyn SessionLogger>,
    settings: CompletionSettings,
    active: AtomicBool,
}

impl StreamSessionUseCase {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn DocumentSink>,
        credentials: Arc<dyn CredentialProvider>,
        notifier: Arc<dyn NotificationChannel>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            transport,
            sink,
            credentials,
            notifier,
            observer: Arc::new(NoSessionObserver),
            logger: Arc::new(NoSessionLogger),
            settings,
            active: AtomicBool::new(false),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Whether a session is currently running
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Run one session to completion.
    ///
    /// Only one session may run at a time; overlapping calls are rejected
    /// with [`SessionError::AlreadyActive`]. A missing credential is not an
    /// error: the user is notified and the report says so.
    pub async fn start(&self, messages: Vec<Message>) -> Result<SessionReport, SessionError> {
        let _guard = ActiveGuard::acquire(&self.active).ok_or(SessionError::AlreadyActive)?;

        let session = StreamSession::new(self.settings.markers.clone());

        let Some(api_key) = self
            .credentials
            .api_key()
            .filter(|key| !key.trim().is_empty())
        else {
            warn!("No API key configured; session not started");
            self.notifier.notify(NO_API_KEY_NOTICE);
            return Ok(session.finish(self, SessionEnd::MissingCredential));
        };

        let request = self.build_request(&api_key, messages)?;
        Ok(session.run(self, request).await)
    }

    fn build_request(
        &self,
        api_key: &str,
        messages: Vec<Message>,
    ) -> Result<TransportRequest, SessionError> {
        let body = CompletionRequest::streaming(self.settings.model.as_str(), messages).to_json()?;

        Ok(TransportRequest::post(self.settings.endpoint.as_str(), body)
            .with_header("Authorization", format!("Bearer {}", api_key))
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "text/event-stream"))
    }
}

/// Marks the use case active for as long as it is held.
struct ActiveGuard<'a>(&'a AtomicBool);

impl<'a> ActiveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One request-to-completion streaming exchange.
///
/// Owns the assembler (and with it the session state); dropped when the
/// session ends so nothing leaks into the next one.
pub struct StreamSession {
    assembler: StreamAssembler,
    phase: SessionPhase,
    phases: Vec<SessionPhase>,
    appended: usize,
    dropped: usize,
    decode_errors: usize,
}

impl StreamSession {
    pub fn new(markers: BoundaryMarkers) -> Self {
        Self {
            assembler: StreamAssembler::new(markers),
            phase: SessionPhase::Idle,
            phases: vec![SessionPhase::Idle],
            appended: 0,
            dropped: 0,
            decode_errors: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    async fn run(mut self, ctx: &StreamSessionUseCase, request: TransportRequest) -> SessionReport {
        info!(
            "Starting streaming session with model {}",
            ctx.settings.model
        );
        ctx.logger.log(SessionLogEvent::new(
            "request_sent",
            json!({
                "endpoint": request.url,
                "model": ctx.settings.model,
                "bytes": request.body.len(),
            }),
        ));

        self.enter(ctx, SessionPhase::Connecting);

        let mut subscription = match ctx.transport.open(request).await {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!("Failed to open stream: {}", e);
                // An open error counts as the connection's first outcome
                self.enter(ctx, SessionPhase::Streaming);
                return self.finish(ctx, SessionEnd::TransportFailed(e.to_string()));
            }
        };

        let end = self.consume(ctx, &mut subscription).await;
        subscription.close();
        self.finish(ctx, end)
    }

    async fn consume(
        &mut self,
        ctx: &StreamSessionUseCase,
        subscription: &mut FrameSubscription,
    ) -> SessionEnd {
        while let Some(event) = subscription.next_event().await {
            if self.phase == SessionPhase::Connecting {
                self.enter(ctx, SessionPhase::Streaming);
            }

            match event {
                TransportEvent::Frame(raw) => {
                    debug!(bytes = raw.len(), "Received frame");
                    if self.handle_frame(ctx, &raw).await {
                        return SessionEnd::Completed;
                    }
                }
                TransportEvent::Error(e) => {
                    warn!("Streaming transport failed: {}", e);
                    return SessionEnd::TransportFailed(e.to_string());
                }
            }
        }

        debug!("Transport closed before the terminal marker");
        SessionEnd::Disconnected
    }

    /// Processes every candidate in `raw`. Returns `true` once terminated.
    async fn handle_frame(&mut self, ctx: &StreamSessionUseCase, raw: &str) -> bool {
        for candidate in FrameDecoder::decode(raw) {
            let event = match DeltaParser::parse(candidate) {
                Ok(ParsedCandidate::Delta(delta)) => StreamEvent::Delta(delta),
                Ok(ParsedCandidate::Terminal) => StreamEvent::Terminal,
                Ok(ParsedCandidate::Control) => continue,
                Err(e) => {
                    self.decode_errors += 1;
                    warn!("Skipping undecodable stream payload: {}", e);
                    ctx.logger.log(SessionLogEvent::new(
                        "decode_error",
                        json!({ "error": e.to_string() }),
                    ));
                    continue;
                }
            };

            let step = self.assembler.apply(event);
            let terminated = step.is_terminated();
            if let Some(op) = step.into_append() {
                self.append(ctx, op).await;
            }
            if terminated {
                return true;
            }
        }
        false
    }

    async fn append(&mut self, ctx: &StreamSessionUseCase, op: AppendOp) {
        match self.write(ctx.sink.as_ref(), &op).await {
            Ok(()) => {
                self.appended += 1;
                ctx.observer.on_fragment(&op.text);
                if let Err(e) = move_cursor_to_end(ctx.sink.as_ref()).await {
                    warn!("Failed to move cursor to end of document: {}", e);
                }
            }
            Err(SinkError::Unavailable) => {
                self.dropped += 1;
                warn!("No active document; dropping {} bytes", op.text.len());
                ctx.notifier.notify(NO_ACTIVE_FILE_NOTICE);
            }
            Err(e) => {
                self.dropped += 1;
                warn!("Failed to write document: {}", e);
            }
        }
    }

    /// Appends through the in-memory mirror; the mirror only advances once
    /// the sink accepted the write.
    async fn write(&mut self, sink: &dyn DocumentSink, op: &AppendOp) -> Result<(), SinkError> {
        if !self.assembler.has_document() {
            let content = sink.read_all().await?;
            self.assembler.seed_document(content);
        }

        let next = self.assembler.document_with(op);
        sink.replace_all(&next).await?;
        self.assembler.commit_document(next);
        Ok(())
    }

    fn enter(&mut self, ctx: &StreamSessionUseCase, next: SessionPhase) {
        if !self.phase.can_transition_to(next) {
            return;
        }
        debug!("Session phase: {} -> {}", self.phase, next);
        self.phase = next;
        self.phases.push(next);
        ctx.observer.on_phase(next);
    }

    fn finish(mut self, ctx: &StreamSessionUseCase, end: SessionEnd) -> SessionReport {
        self.enter(ctx, SessionPhase::Closed);

        info!(
            appended = self.appended,
            dropped = self.dropped,
            decode_errors = self.decode_errors,
            "Streaming session ended: {}",
            end.as_str()
        );
        ctx.logger.log(SessionLogEvent::new(
            "session_end",
            json!({
                "end": end.as_str(),
                "appended": self.appended,
                "dropped": self.dropped,
                "decode_errors": self.decode_errors,
            }),
        ));

        SessionReport {
            end,
            phases: self.phases,
            appended: self.appended,
            dropped: self.dropped,
            decode_errors: self.decode_errors,
        }
    }
}
