//! Infrastructure implementation of the `ManifestStore` port.
//!
//! Writes are atomic (temp file + rename) so the execution service never
//! reads a half-written manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use studio_common::RootManifest;

use crate::application::ports::ManifestStore;
use crate::domain::manifest::{parse_manifest, render_manifest};

/// `ManifestStore` backed by a JSON file (`langgraph.json`).
pub struct JsonManifestStore {
    path: PathBuf,
}

impl JsonManifestStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestStore for JsonManifestStore {
    fn load(&self) -> Result<RootManifest> {
        if !self.path.exists() {
            return Ok(RootManifest::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading manifest {}", self.path.display()))?;
        parse_manifest(&content).with_context(|| format!("parsing manifest {}", self.path.display()))
    }

    fn store(&self, manifest: &RootManifest) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = render_manifest(manifest)?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing manifest {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), graphs = manifest.graphs.len(), "manifest stored");
        Ok(())
    }
}
