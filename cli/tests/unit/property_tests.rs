//! Property-based tests for the SSE decoder.
//!
//! Uses `proptest` to verify chunk-boundary independence across many random
//! streams and split points.

#![allow(clippy::expect_used)]

use futures_util::stream;
use proptest::prelude::*;

use studio_cli::application::services::test_run::{SseEventStream, collect_events};
use studio_cli::domain::error::StreamError;
use studio_cli::domain::sse::{parse_block, split_blocks};
use studio_common::SseEvent;

/// Random SSE text built from a small alphabet that exercises separators,
/// `\r\n` pairs, field prefixes, and multi-byte characters.
fn sse_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("event: a".to_string()),
            Just("data: ".to_string()),
            Just("data: {\"k\": 1}".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("\r".to_string()),
            Just(": comment".to_string()),
            Just("é€".to_string()),
            "[a-z ]{0,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

/// Byte offsets at which to cut a buffer of `len` bytes.
fn cut_points(len: usize, raw: &[usize]) -> Vec<usize> {
    let mut cuts: Vec<usize> = raw.iter().map(|c| c % (len + 1)).collect();
    cuts.sort_unstable();
    cuts.dedup();
    cuts
}

fn chunked(text: &str, cuts: &[usize]) -> Vec<Result<Vec<u8>, StreamError>> {
    let bytes = text.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        chunks.push(Ok(bytes[start..cut].to_vec()));
        start = cut;
    }
    chunks.push(Ok(bytes[start..].to_vec()));
    chunks
}

/// Events from decoding the whole buffer in one pass.
fn whole_buffer_events(text: &str) -> Vec<SseEvent> {
    let frames = split_blocks(text);
    let mut events: Vec<SseEvent> = frames.blocks.iter().map(|b| parse_block(b)).collect();
    if !frames.remainder.trim().is_empty() {
        events.push(parse_block(&frames.remainder));
    }
    events
}

fn streamed_events(text: &str, cuts: &[usize]) -> Vec<SseEvent> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let outcome = runtime.block_on(collect_events(
        SseEventStream::new(stream::iter(chunked(text, cuts))),
        |_| {},
    ));
    outcome.events
}

proptest! {
    /// Any chunking of a stream yields the same events, in the same order,
    /// as decoding the whole buffer at once.
    #[test]
    fn prop_chunk_boundaries_do_not_change_events(
        text in sse_text(),
        raw_cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let cuts = cut_points(text.len(), &raw_cuts);
        prop_assert_eq!(streamed_events(&text, &cuts), whole_buffer_events(&text));
    }

    /// Splitting at every single byte is the most adversarial chunking.
    #[test]
    fn prop_byte_at_a_time_matches_whole_buffer(text in sse_text()) {
        let cuts: Vec<usize> = (1..text.len()).collect();
        prop_assert_eq!(streamed_events(&text, &cuts), whole_buffer_events(&text));
    }

    /// Blocks and remainder are normalized; only a single trailing `\r` may
    /// be held back, and the remainder never holds a complete separator.
    #[test]
    fn prop_remainder_has_no_separator(text in sse_text()) {
        let frames = split_blocks(&text);
        let body = frames.remainder.strip_suffix('\r').unwrap_or(&frames.remainder);
        prop_assert!(!body.contains('\r'), "remainder {:?}", frames.remainder);
        prop_assert!(!body.contains("\n\n"), "remainder {:?}", frames.remainder);
        prop_assert!(frames.blocks.iter().all(|b| !b.contains('\r')));
    }
}
