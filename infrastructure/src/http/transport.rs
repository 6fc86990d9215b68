//! HTTP streaming transport backed by `reqwest`.
//!
//! [`ReqwestTransport::open`] sends the request, checks the status, then
//! hands the response body to a background reader task. The task reassembles
//! server-sent events with [`SseEventBuffer`] and publishes one frame per
//! event until the body ends, the connection fails, or the subscription is
//! closed.

use super::event_buffer::SseEventBuffer;
use async_trait::async_trait;
use futures::StreamExt;
use notegpt_application::ports::transport::{
    FramePublisher, FrameSubscription, HttpMethod, Transport, TransportError, TransportRequest,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Frames buffered between the reader task and the session
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Default TCP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] adapter speaking HTTP + server-sent events.
pub struct ReqwestTransport {
    client: reqwest::Client,
    capacity: usize,
}

impl ReqwestTransport {
    /// Creates a transport with the given connect timeout.
    ///
    /// Only connecting is bounded; a stream that stays open is never cut off.
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn open(&self, request: TransportRequest) -> Result<FrameSubscription, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        info!("Opening stream: {} {}", request.method.as_str(), request.url);

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    TransportError::InvalidRequest(e.to_string())
                } else {
                    TransportError::Connect(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Stream request failed: {} - {}", status, body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        debug!("Stream response started: status={}", status);

        let (publisher, subscription) = FrameSubscription::channel(self.capacity);
        tokio::spawn(read_events(response, publisher));
        Ok(subscription)
    }
}

/// Reader task: forwards every complete event until the body ends.
async fn read_events(response: reqwest::Response, publisher: FramePublisher) {
    let cancel = publisher.cancellation().clone();
    let mut body = response.bytes_stream();
    let mut buffer = SseEventBuffer::new();

    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Subscription closed; stopping stream reader");
                return;
            }
            chunk = body.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                for event in buffer.push(&bytes) {
                    if !publisher.frame(event).await {
                        return;
                    }
                }
            }
            Some(Err(e)) => {
                warn!("Stream body failed: {}", e);
                publisher.error(TransportError::Stream(e.to_string())).await;
                return;
            }
            None => {
                if let Some(event) = buffer.finish() {
                    publisher.frame(event).await;
                }
                debug!("Stream body finished");
                return;
            }
        }
    }
}

/// Picks the most useful message out of an error response body.
///
/// OpenAI-compatible endpoints answer with `{"error": {"message": ...}}`.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let from_envelope = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    match from_envelope {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
