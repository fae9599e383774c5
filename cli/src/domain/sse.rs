//! Server-Sent-Events framing and event parsing. Pure functions, no I/O.
//!
//! [`split_blocks`] cuts an accumulated text buffer into complete blocks plus
//! the unconsumed remainder; [`parse_block`] turns one block into an
//! [`SseEvent`]. Neither keeps state between calls: everything a later pass
//! needs travels through the returned remainder.

use std::borrow::Cow;

use studio_common::sse::{DEFAULT_EVENT_NAME, SseEvent};

/// Blank line that terminates a block in normalized text.
pub const BLOCK_SEPARATOR: &str = "\n\n";

const EVENT_FIELD: &str = "event:";
const DATA_FIELD: &str = "data:";

/// Complete blocks cut from a buffer, and the suffix still waiting for its
/// separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frames {
    pub blocks: Vec<String>,
    pub remainder: String,
}

/// Canonicalize `\r\n` and lone `\r` to `\n`.
///
/// Idempotent; input without `\r` is returned borrowed and unchanged.
#[must_use]
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Split `buffer` into complete blocks and a remainder.
///
/// The remainder (possibly empty) must be prepended to the next chunk. A
/// trailing `\r` is left raw at the end of the remainder: it may be the first
/// half of a `\r\n` pair whose `\n` has not arrived yet.
#[must_use]
pub fn split_blocks(buffer: &str) -> Frames {
    let (body, held) = match buffer.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (buffer, ""),
    };
    let normalized = normalize_line_endings(body);

    let mut blocks: Vec<String> = normalized
        .split(BLOCK_SEPARATOR)
        .map(str::to_owned)
        .collect();
    // `split` always yields at least one segment.
    let mut remainder = blocks.pop().unwrap_or_default();
    remainder.push_str(held);

    Frames { blocks, remainder }
}

/// Parse one complete block into an event.
///
/// The last `event:` line wins; `data:` values are trimmed and concatenated
/// without a separator. Unknown fields and comments are ignored. A payload
/// that is not valid JSON leaves `data` empty and never fails.
#[must_use]
pub fn parse_block(block: &str) -> SseEvent {
    let normalized = normalize_line_endings(block);

    let mut event: Option<String> = None;
    let mut raw = String::new();
    for line in normalized.split('\n') {
        if let Some(value) = line.strip_prefix(EVENT_FIELD) {
            event = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(DATA_FIELD) {
            raw.push_str(value.trim());
        }
    }

    let data = if raw.is_empty() {
        None
    } else {
        serde_json::from_str(&raw).ok()
    };

    SseEvent {
        event: event.unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string()),
        raw,
        data,
    }
}

/// Decode as much of `pending` as forms complete UTF-8, leaving an
/// incomplete trailing sequence in place for the next chunk.
///
/// Invalid sequences become U+FFFD.
pub fn drain_utf8(pending: &mut Vec<u8>) -> String {
    let mut out = String::new();
    loop {
        match std::str::from_utf8(pending) {
            Ok(text) => {
                out.push_str(text);
                pending.clear();
                return out;
            }
            Err(err) => {
                let valid = err.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&pending[..valid]));
                match err.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        pending.drain(..valid + len);
                    }
                    None => {
                        pending.drain(..valid);
                        return out;
                    }
                }
            }
        }
    }
}
