// lib/crates/studio-common/src/sse.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event name used when a block carries no `event:` line.
pub const DEFAULT_EVENT_NAME: &str = "message";

/// One event decoded from a Server-Sent-Events stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SseEvent {
    /// Value of the last `event:` line, or [`DEFAULT_EVENT_NAME`].
    pub event: String,
    /// All `data:` values of the block, concatenated in order.
    pub raw: String,
    /// `raw` decoded as JSON. `None` when `raw` is empty or not valid JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
