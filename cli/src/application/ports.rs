//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `studio_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use futures_util::stream::BoxStream;
use studio_common::{RootManifest, RunRequest};

use crate::domain::StudioConfig;
use crate::domain::error::StreamError;

// ── Value Types ───────────────────────────────────────────────────────────────

/// The two files stored in every agent directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Program source (`agent.py` by default).
    Code,
    /// Per-agent JSON configuration (`langgraph.json` by default).
    Config,
}

impl Payload {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Config => "config",
        }
    }
}

/// Raw response body chunks as they arrive from the execution service.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, StreamError>>;

// ── Registry Ports ────────────────────────────────────────────────────────────

/// Per-agent directory storage. Sync trait, filesystem calls are short.
pub trait AgentStore {
    /// Names of all agent directories, in enumeration order. Non-directories
    /// are skipped.
    fn agent_names(&self) -> Result<Vec<String>>;
    /// Directory that holds (or would hold) the agent's files.
    fn agent_path(&self, name: &str) -> PathBuf;
    fn agent_exists(&self, name: &str) -> Result<bool>;
    /// Read one payload file. A missing file is `Ok(None)`.
    fn read_payload(&self, name: &str, payload: Payload) -> Result<Option<String>>;
    /// Create the agent directory if absent.
    fn create_agent_dir(&self, name: &str) -> Result<()>;
    /// Overwrite one payload file completely.
    fn write_payload(&self, name: &str, payload: Payload, content: &str) -> Result<()>;
    /// Remove the agent directory and everything in it.
    fn remove_agent(&self, name: &str) -> Result<()>;
}

/// Root manifest persistence with explicit load and store steps.
pub trait ManifestStore {
    /// Load the manifest. A missing or empty file is an empty manifest.
    fn load(&self) -> Result<RootManifest>;
    /// Persist the whole manifest, replacing the previous content.
    fn store(&self, manifest: &RootManifest) -> Result<()>;
}

/// Source of the effective configuration.
pub trait ConfigStore {
    /// Load config from file (defaults if absent) with env overrides applied.
    fn load(&self) -> Result<StudioConfig>;
    /// Path the config is read from.
    fn path(&self) -> &Path;
}

// ── Execution Service Port ────────────────────────────────────────────────────

/// Opens a streaming run against the execution service.
#[allow(async_fn_in_trait)]
pub trait RunTransport {
    /// Send the run request and return the response body as a chunk stream.
    ///
    /// # Errors
    ///
    /// [`StreamError::Rejected`] for a non-success status (the body is never
    /// streamed), [`StreamError::Transport`] if the service is unreachable.
    async fn open_stream(&self, request: &RunRequest) -> Result<ChunkStream, StreamError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
