//! Application layer. Port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain`, never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

pub use ports::{
    AgentStore, ChunkStream, ConfigStore, ManifestStore, Payload, ProgressReporter, RunTransport,
};
