//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors reported by agent registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Missing or malformed agent name. Raised before any I/O.
    #[error("{0}")]
    Validation(String),

    #[error("Agent '{0}' not found.")]
    NotFound(String),

    /// A filesystem step failed; `source` carries the underlying cause and is
    /// printed by the error chain, not by this message.
    #[error("{action}")]
    Io {
        action: String,
        #[source]
        source: anyhow::Error,
    },

    /// Agent files were written but the manifest could not be updated.
    ///
    /// `cause` is part of the message so the repair hint stays last.
    #[error(
        "Agent '{name}' was saved but the manifest was not updated: {cause:#}\n\
         The execution service will not see it until reconciled: studio agents reconcile --apply"
    )]
    PartialSuccess { name: String, cause: anyhow::Error },
}

impl RegistryError {
    /// Wrap a filesystem failure with the action that was attempted.
    pub fn io(action: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Io {
            action: action.into(),
            source,
        }
    }

    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Io { .. } => "io",
            Self::PartialSuccess { .. } => "partial_success",
        }
    }
}

// ── Stream errors ─────────────────────────────────────────────────────────────

/// Errors from a test run against the execution service.
///
/// A clean stream that ends with zero events is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    /// The service answered with a non-success status before streaming began.
    #[error("Execution service rejected the run: HTTP {status}{}", format_body(.body))]
    Rejected { status: u16, body: String },

    /// Connecting to the service or reading the stream failed.
    #[error("Stream transport failed: {0}")]
    Transport(String),
}

impl StreamError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::Transport(_) => "transport",
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(" ({body})")
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
