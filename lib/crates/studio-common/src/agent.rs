// lib/crates/studio-common/src/agent.rs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Config payload written when a save supplies none.
pub const DEFAULT_CONFIG: &str = "{}";

/// One agent as found on disk: its directory name plus both payloads.
///
/// `code` and `config` are opaque text. The registry never parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub name: String,
    pub code: String,
    pub config: String,
    pub path: PathBuf,
    #[serde(default)]
    pub status: EntryStatus,
}

/// Outcome of reading a single entry during a listing.
///
/// A degraded entry still appears in the listing, with defaulted payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Ok,
    Degraded {
        reason: String,
    },
}

impl EntryStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}
