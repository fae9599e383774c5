//! Domain logic for the agent registry. Pure functions, no I/O, no async.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.

pub mod templates;
pub mod validate;

pub use templates::{AGENT_TEMPLATE, CONFIG_TEMPLATE};
pub use validate::{AGENT_NAME_RE, config_is_json, is_valid_agent_name, validate_agent_name};

/// Where the execution service finds an agent's compiled graph.
///
/// Locators have the form `./<agents_dir>/<name>/<file>:<symbol>` and are
/// always relative to the manifest's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub agents_dir: String,
    pub file: String,
    pub symbol: String,
}

impl Default for EntryPoint {
    fn default() -> Self {
        Self {
            agents_dir: "agents".to_string(),
            file: "agent.py".to_string(),
            symbol: "app".to_string(),
        }
    }
}

impl EntryPoint {
    #[must_use]
    pub fn locator(&self, name: &str) -> String {
        let dir = self.agents_dir.trim_start_matches("./").trim_end_matches('/');
        format!("./{dir}/{name}/{}:{}", self.file, self.symbol)
    }
}
