//! Agent name and payload checks. No I/O, no async.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::error::RegistryError;

/// Agent names become directory names and manifest keys, so they are
/// restricted before any path interpolation to prevent path traversal
/// (CWE-22): no separators, no leading dot, at most 128 characters.
pub static AGENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern, it cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").expect("valid regex")
});

/// Returns `true` if `name` is a valid agent name.
pub fn is_valid_agent_name(name: &str) -> bool {
    AGENT_NAME_RE.is_match(name)
}

/// Reject empty or unsafe agent names.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] describing the problem.
pub fn validate_agent_name(name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::Validation("Agent name is required.".to_string()));
    }
    if !is_valid_agent_name(name) {
        return Err(RegistryError::Validation(format!(
            "Invalid agent name '{name}'. Use letters, digits, '_', '-' or '.', \
             not starting with '.' or '-' (max 128 characters)."
        )));
    }
    Ok(())
}

/// Whether an agent's config text decodes as JSON.
///
/// Config stays opaque to the registry; this only drives warnings and the
/// listing's validity column.
pub fn config_is_json(config: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(config).is_ok()
}
