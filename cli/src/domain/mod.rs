//! Domain layer. Pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod agent;
pub mod config;
pub mod error;
pub mod manifest;
pub mod sse;

pub use config::StudioConfig;
pub use error::{ConfigError, RegistryError, StreamError};
