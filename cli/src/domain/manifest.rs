//! Pure merge operations on the root manifest's `graphs` mapping.
//!
//! Loading and persisting belong to the `ManifestStore` port; this module only
//! decides what the next manifest looks like.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use studio_common::RootManifest;

/// Decode manifest text. Empty or whitespace-only input is an empty manifest.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object of the expected shape.
pub fn parse_manifest(text: &str) -> Result<RootManifest> {
    if text.trim().is_empty() {
        return Ok(RootManifest::default());
    }
    serde_json::from_str(text).context("manifest is not valid JSON")
}

/// Encode a manifest as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_manifest(manifest: &RootManifest) -> Result<String> {
    let mut text = serde_json::to_string_pretty(manifest).context("failed to encode manifest")?;
    text.push('\n');
    Ok(text)
}

/// Register `name` under `locator`. Returns `true` if the mapping changed.
pub fn upsert_graph(manifest: &mut RootManifest, name: &str, locator: &str) -> bool {
    if manifest.graphs.get(name).is_some_and(|l| l == locator) {
        return false;
    }
    manifest.graphs.insert(name.to_string(), locator.to_string());
    true
}

/// Unregister `name`. Returns `true` if it was present.
pub fn remove_graph(manifest: &mut RootManifest, name: &str) -> bool {
    manifest.graphs.remove(name).is_some()
}

/// Disagreement between agent directories and the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Drift {
    /// Agent directories with no `graphs` entry.
    pub missing_in_manifest: Vec<String>,
    /// `graphs` entries with no agent directory.
    pub dangling_in_manifest: Vec<String>,
}

impl Drift {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing_in_manifest.is_empty() && self.dangling_in_manifest.is_empty()
    }
}

/// Compare directory names against the manifest. Both lists come back sorted.
pub fn detect_drift<'a>(
    directories: impl IntoIterator<Item = &'a str>,
    manifest: &RootManifest,
) -> Drift {
    let on_disk: BTreeSet<&str> = directories.into_iter().collect();
    let registered: BTreeSet<&str> = manifest.graph_names().collect();

    Drift {
        missing_in_manifest: on_disk
            .difference(&registered)
            .map(|s| (*s).to_string())
            .collect(),
        dangling_in_manifest: registered
            .difference(&on_disk)
            .map(|s| (*s).to_string())
            .collect(),
    }
}
