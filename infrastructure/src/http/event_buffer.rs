//! Reassembly of server-sent events from network chunks.
//!
//! The HTTP body arrives in arbitrary pieces: one chunk may carry several
//! events, and an event (or a multi-byte UTF-8 sequence inside it) may be
//! split across chunks. [`SseEventBuffer`] holds the bytes until a blank line
//! completes an event, so downstream decoding always sees whole events.

/// Byte buffer that yields complete SSE events.
#[derive(Debug, Default)]
pub struct SseEventBuffer {
    pending: Vec<u8>,
    /// Prefix of `pending` already searched for a blank line
    scanned: usize,
}

impl SseEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one network chunk and returns every event it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some((end, separator)) = next_boundary(&self.pending, self.scanned) {
            let rest = self.pending.split_off(end + separator);
            let raw = std::mem::replace(&mut self.pending, rest);
            self.scanned = 0;
            if let Some(event) = event_text(&raw[..end]) {
                events.push(event);
            }
        }
        // A separator can straddle chunks; rescan its possible first bytes
        self.scanned = self.pending.len().saturating_sub(2);
        events
    }

    /// Returns the trailing event of a body that ended without a blank line.
    pub fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        let raw = std::mem::take(&mut self.pending);
        event_text(&raw)
    }

    /// Bytes held back waiting for the end of an event.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Finds the first blank line at or after `from`: returns the offset of the
/// newline ending the event and the length of the separator (`\n\n` or
/// `\n\r\n`).
fn next_boundary(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    bytes.iter().enumerate().skip(from).find_map(|(i, b)| {
        if *b != b'\n' {
            return None;
        }
        match &bytes[i + 1..] {
            [b'\n', ..] => Some((i, 2)),
            [b'\r', b'\n', ..] => Some((i, 3)),
            _ => None,
        }
    })
}

fn event_text(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_end_matches(['\r', '\n']);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
