//! Application service: trial runs against the execution service.
//!
//! [`SseEventStream`] turns a chunked byte stream into parsed events no matter
//! how event boundaries, lines, or UTF-8 characters are split across reads.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_util::{Stream, StreamExt};
use studio_common::{RunRequest, SseEvent};

use crate::application::ports::RunTransport;
use crate::domain::error::StreamError;
use crate::domain::sse::{drain_utf8, parse_block, split_blocks};

/// Lazy, finite, non-restartable stream of events decoded from `inner`.
///
/// After the inner stream ends or fails, this yields `None` forever.
pub struct SseEventStream<S> {
    inner: S,
    /// Bytes of a UTF-8 sequence split across chunks.
    pending: Vec<u8>,
    buffer: String,
    ready: VecDeque<SseEvent>,
    finished: bool,
}

impl<S> SseEventStream<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            buffer: String::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }

    fn push_chunk(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        let text = drain_utf8(&mut self.pending);
        self.buffer.push_str(&text);

        let frames = split_blocks(&self.buffer);
        for block in &frames.blocks {
            self.enqueue(block);
        }
        self.buffer = frames.remainder;
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.buffer.push_str(&String::from_utf8_lossy(&self.pending));
            self.pending.clear();
        }
        let rest = std::mem::take(&mut self.buffer);
        if !rest.trim().is_empty() {
            self.enqueue(&rest);
        }
    }

    fn enqueue(&mut self, block: &str) {
        let event = parse_block(block);
        tracing::debug!(event = %event.event, bytes = event.raw.len(), "sse event");
        self.ready.push_back(event);
    }
}

impl<S, B, E> Stream for SseEventStream<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<StreamError>,
{
    type Item = Result<SseEvent, StreamError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(event) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.finished {
                return Poll::Ready(None);
            }
            match ready!(this.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => this.push_chunk(chunk.as_ref()),
                Some(Err(err)) => {
                    this.finished = true;
                    this.pending.clear();
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(err.into())));
                }
                None => {
                    this.finished = true;
                    this.flush();
                }
            }
        }
    }
}

/// Events received during a run, and the error that ended it early if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub events: Vec<SseEvent>,
    pub error: Option<StreamError>,
}

impl RunOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Drive `stream` to the end, calling `on_event` as each event arrives.
///
/// A mid-stream error stops collection; events seen before it are kept.
pub async fn collect_events<S>(
    mut stream: S,
    mut on_event: impl FnMut(&SseEvent),
) -> RunOutcome
where
    S: Stream<Item = Result<SseEvent, StreamError>> + Unpin,
{
    let mut outcome = RunOutcome::default();
    while let Some(item) = stream.next().await {
        match item {
            Ok(event) => {
                on_event(&event);
                outcome.events.push(event);
            }
            Err(err) => {
                tracing::warn!(error = %err, received = outcome.events.len(), "stream ended early");
                outcome.error = Some(err);
                break;
            }
        }
    }
    outcome
}

/// Send `request` and decode the response stream.
///
/// # Errors
///
/// Returns the transport's error when the run could not be started:
/// [`StreamError::Rejected`] for a non-success status, never fed into the
/// decoder. Failures after streaming began are reported in
/// [`RunOutcome::error`].
pub async fn run_agent(
    transport: &impl RunTransport,
    request: &RunRequest,
    on_event: impl FnMut(&SseEvent),
) -> Result<RunOutcome, StreamError> {
    tracing::info!(assistant_id = %request.assistant_id, "starting run");
    let chunks = transport.open_stream(request).await?;
    Ok(collect_events(SseEventStream::new(chunks), on_event).await)
}
