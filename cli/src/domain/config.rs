//! Domain types and validators for Studio configuration.
//!
//! Pure functions only. No I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::agent::EntryPoint;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const ENV_CONFIG: &str = "STUDIO_CONFIG";
pub const ENV_ROOT: &str = "STUDIO_ROOT";
pub const ENV_API_URL: &str = "STUDIO_API_URL";
pub const DEFAULT_CONFIG_FILE: &str = "studio.yaml";
pub const DEFAULT_API_URL: &str = "http://localhost:8123";

// ── Config schema ────────────────────────────────────────────────────────────

/// Effective configuration, read from `studio.yaml` and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Project root holding the agents directory and the manifest.
    pub root: PathBuf,
    /// Agents directory, relative to `root`.
    pub agents_dir: String,
    /// Root manifest file, relative to `root`.
    pub manifest: String,
    /// Program source file inside each agent directory.
    pub code_file: String,
    /// Configuration file inside each agent directory.
    pub config_file: String,
    /// Symbol the execution service loads from `code_file`.
    pub entry_symbol: String,
    /// Base URL of the execution service.
    pub api_url: String,
    pub connect_timeout_secs: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            agents_dir: "agents".to_string(),
            manifest: "langgraph.json".to_string(),
            code_file: "agent.py".to_string(),
            config_file: "langgraph.json".to_string(),
            entry_symbol: "app".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl StudioConfig {
    #[must_use]
    pub fn agents_root(&self) -> PathBuf {
        self.root.join(&self.agents_dir)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    #[must_use]
    pub fn entry_point(&self) -> EntryPoint {
        EntryPoint {
            agents_dir: self.agents_dir.clone(),
            file: self.code_file.clone(),
            symbol: self.entry_symbol.clone(),
        }
    }

    /// Apply `STUDIO_ROOT` / `STUDIO_API_URL` overrides.
    ///
    /// `lookup` abstracts the environment so callers and tests can inject it.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ENV_ROOT).filter(|v| !v.is_empty()) {
            self.root = PathBuf::from(root);
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
    }

    /// Check values that would otherwise fail late or write outside an agent
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(invalid(
                "api_url",
                &self.api_url,
                "Expected an http:// or https:// URL.",
            ));
        }
        for (key, value) in [
            ("code_file", &self.code_file),
            ("config_file", &self.config_file),
        ] {
            if !is_plain_file_name(value) {
                return Err(invalid(key, value, "Expected a plain file name."));
            }
        }
        if self.code_file == self.config_file {
            return Err(invalid(
                "config_file",
                &self.config_file,
                "Must differ from code_file.",
            ));
        }
        if self.entry_symbol.trim().is_empty() {
            return Err(invalid("entry_symbol", "", "Must not be empty."));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str, hint: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && Path::new(name).file_name().is_some_and(|f| f == name)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
