//! Infrastructure layer. Concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: filesystem access, the
//! manifest file, the HTTP run client, and config loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod fs;
pub mod http;
pub mod manifest;

pub use config::YamlConfigStore;
pub use fs::LocalAgentStore;
pub use http::HttpRunClient;
pub use manifest::JsonManifestStore;
