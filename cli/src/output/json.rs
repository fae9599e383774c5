//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the JSON renderer for successful results.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use studio_common::{AgentEntry, SseEvent};

use crate::application::services::registry::{DeleteOutcome, ReconcileReport, SaveOutcome};
use crate::domain::StudioConfig;
use crate::domain::error::{ConfigError, RegistryError, StreamError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for an error, taken from the first typed error in
/// its chain. Untyped errors map to `"error"`.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<RegistryError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<StreamError>() {
            return e.code();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "validation";
        }
    }
    "error"
}

/// Renders results as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_agent_list(&self, agents: &[AgentEntry]) -> Result<()> {
        print_pretty(&agents)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_agent(&self, agent: &AgentEntry) -> Result<()> {
        print_pretty(agent)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_saved(&self, outcome: &SaveOutcome, config_valid: bool) -> Result<()> {
        print_pretty(&serde_json::json!({
            "saved": outcome,
            "config_valid": config_valid,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_deleted(&self, outcome: &DeleteOutcome) -> Result<()> {
        print_pretty(&serde_json::json!({ "deleted": outcome }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_reconcile(&self, report: &ReconcileReport) -> Result<()> {
        print_pretty(report)
    }

    /// One compact object per line, so output can be consumed as NDJSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_event(&self, event: &SseEvent) -> Result<()> {
        let line = serde_json::to_string(event).context("JSON serialization failed")?;
        println!("{line}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &StudioConfig, path: &Path) -> Result<()> {
        print_pretty(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config_path(&self, path: &Path) -> Result<()> {
        print_pretty(&serde_json::json!({ "path": path.display().to_string() }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_pretty(&serde_json::json!({ "version": version }))
    }
}

fn print_pretty(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}
