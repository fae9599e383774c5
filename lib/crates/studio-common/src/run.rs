// lib/crates/studio-common/src/run.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stream mode requested from the execution service.
pub const DEFAULT_STREAM_MODE: &str = "messages-tuple";

/// Body of `POST /runs/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Agent name, as registered in the manifest's `graphs`.
    pub assistant_id: String,
    pub input: Value,
    pub stream_mode: String,
}

impl RunRequest {
    #[must_use]
    pub fn new(assistant_id: impl Into<String>, input: Value) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            input,
            stream_mode: DEFAULT_STREAM_MODE.to_string(),
        }
    }
}
