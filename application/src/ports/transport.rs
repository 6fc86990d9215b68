//! Streaming transport port
//!
//! Defines how the application opens a long-lived streaming connection to
//! the completion endpoint and receives its raw frames.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors reported by a transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Stream error: {0}")]
    Stream(String),
}

/// HTTP method of a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Target and configuration of a streaming request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub method: HttpMethod,
    /// Header name → value
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl TransportRequest {
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Something delivered on a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// One raw frame, in arrival order.
    Frame(String),
    /// The connection failed; no frames follow.
    Error(TransportError),
}

/// Receiving end of an open streaming connection.
///
/// The stream is over when [`next_event`](Self::next_event) returns `None`,
/// either because the transport finished or because the subscription was
/// closed. Closing is idempotent and also happens on drop.
pub struct FrameSubscription {
    receiver: mpsc::Receiver<TransportEvent>,
    cancel: CancellationToken,
}

impl FrameSubscription {
    pub fn new(receiver: mpsc::Receiver<TransportEvent>, cancel: CancellationToken) -> Self {
        Self { receiver, cancel }
    }

    /// Creates a connected publisher/subscription pair.
    pub fn channel(buffer: usize) -> (FramePublisher, FrameSubscription) {
        let (sender, receiver) = mpsc::channel(buffer);
        let cancel = CancellationToken::new();
        (
            FramePublisher {
                sender,
                cancel: cancel.clone(),
            },
            FrameSubscription::new(receiver, cancel),
        )
    }

    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        if self.cancel.is_cancelled() {
            return None;
        }
        self.receiver.recv().await
    }

    /// Stops delivery and tells the producer to shut down.
    pub fn close(&mut self) {
        self.cancel.cancel();
        self.receiver.close();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Producing end used by transport implementations.
#[derive(Clone)]
pub struct FramePublisher {
    sender: mpsc::Sender<TransportEvent>,
    cancel: CancellationToken,
}

impl FramePublisher {
    /// Delivers a frame. Returns `false` once the subscriber has gone away.
    pub async fn frame(&self, raw: impl Into<String>) -> bool {
        self.send(TransportEvent::Frame(raw.into())).await
    }

    pub async fn error(&self, error: TransportError) -> bool {
        self.send(TransportEvent::Error(error)).await
    }

    async fn send(&self, event: TransportEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.sender.send(event).await.is_ok()
    }

    /// Token cancelled when the subscription is closed or dropped.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled() || self.sender.is_closed()
    }
}

/// Opens streaming connections
///
/// Implementations (adapters) live in the infrastructure layer and must
/// deliver at least one frame per server-sent event.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn open(&self, request: TransportRequest) -> Result<FrameSubscription, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_header_lookup_is_case_insensitive() {
        let request = TransportRequest::post("https://example.test", "{}")
            .with_header("Content-Type", "application/json");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.method.as_str(), "POST");
        assert_eq!(request.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_frames_arrive_in_order_then_end() {
        let (publisher, mut subscription) = FrameSubscription::channel(8);
        assert!(publisher.frame("a").await);
        assert!(publisher.frame("b").await);
        drop(publisher);

        assert_eq!(subscription.next_event().await, Some(TransportEvent::Frame("a".into())));
        assert_eq!(subscription.next_event().await, Some(TransportEvent::Frame("b".into())));
        assert_eq!(subscription.next_event().await, None);
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_stops_delivery() {
        let (publisher, mut subscription) = FrameSubscription::channel(8);
        assert!(publisher.frame("buffered").await);

        subscription.close();
        subscription.close();

        assert!(subscription.is_closed());
        assert_eq!(subscription.next_event().await, None);
        assert!(publisher.is_closed());
        assert!(!publisher.frame("late").await);
    }

    #[tokio::test]
    async fn test_drop_cancels_publisher() {
        let (publisher, subscription) = FrameSubscription::channel(1);
        drop(subscription);
        assert!(publisher.cancellation().is_cancelled());
    }
}
