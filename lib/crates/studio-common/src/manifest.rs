// lib/crates/studio-common/src/manifest.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root manifest (`langgraph.json`) read by the execution service at start-up.
///
/// Only `graphs` is owned by the registry. Every other top-level field is
/// carried through `extra` so a load/store cycle leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootManifest {
    /// Agent name → entry point locator (`./agents/<name>/agent.py:app`).
    #[serde(default)]
    pub graphs: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RootManifest {
    /// Names registered in `graphs`, in sorted order.
    pub fn graph_names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }
}
