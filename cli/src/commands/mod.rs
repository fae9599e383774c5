//! Command implementations

pub mod agents;
pub mod config;
pub mod run;
pub mod version;
