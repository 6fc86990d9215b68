//! Raw transport frame decoding.
//!
//! A frame is whatever the transport hands over in one callback: it may hold
//! several `data:` entries, a keep-alive comment, or nothing at all.
//! [`FrameDecoder::decode`] turns it into the payload candidates it carries,
//! in order, without ever failing.

use std::str::Split;

/// Label that prefixes every payload line of a server-sent event.
pub const DATA_LABEL: &str = "data:";

/// SSE fields that never carry payload.
const NON_DATA_FIELDS: [&str; 3] = ["event:", "id:", "retry:"];

/// Splits raw frames into payload candidates.
pub struct FrameDecoder;

impl FrameDecoder {
    /// Lazily yields every non-blank candidate in `raw`, label stripped.
    ///
    /// Callers must iterate the whole sequence; a frame is not guaranteed to
    /// hold a single entry.
    pub fn decode(raw: &str) -> Candidates<'_> {
        Candidates {
            lines: raw.split('\n'),
        }
    }
}

/// Iterator returned by [`FrameDecoder::decode`].
pub struct Candidates<'a> {
    lines: Split<'a, char>,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.lines.by_ref().find_map(candidate_from_line)
    }
}

fn candidate_from_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }

    let payload = match line.strip_prefix(DATA_LABEL) {
        Some(rest) => rest.trim_start(),
        None if NON_DATA_FIELDS.iter().any(|f| line.starts_with(f)) => return None,
        None => line,
    };

    if payload.is_empty() { None } else { Some(payload) }
}
