//! Application service: agent registry use-cases.
//!
//! Keeps agent directories and the root manifest's `graphs` mapping in step.
//! Imports only from `crate::domain`, `studio_common`, and
//! `crate::application::ports`. All I/O is routed through injected port
//! traits.

use serde::Serialize;
use studio_common::{AgentEntry, DEFAULT_CONFIG, EntryStatus, RootManifest};

use crate::application::ports::{AgentStore, ManifestStore, Payload, ProgressReporter};
use crate::domain::agent::{EntryPoint, is_valid_agent_name, validate_agent_name};
use crate::domain::error::RegistryError;
use crate::domain::manifest::{Drift, detect_drift, remove_graph, upsert_graph};

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub name: String,
    pub locator: String,
    /// Whether the manifest had to be rewritten.
    pub manifest_updated: bool,
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub name: String,
    pub manifest_updated: bool,
    /// Set when the directory was removed but the manifest update failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Drift found by [`reconcile`], and whether it was repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    #[serde(flatten)]
    pub drift: Drift,
    /// Directories left out of the manifest because their names are not
    /// valid agent names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    pub applied: bool,
}

/// List every agent directory with its code and config.
///
/// Per-entry read failures do not fail the listing: the entry gets default
/// payloads and an [`EntryStatus::Degraded`] status. A directory whose name
/// is not a valid agent name is listed as degraded too.
///
/// # Errors
///
/// Returns [`RegistryError::Io`] if the agents root cannot be enumerated.
pub fn list_agents(store: &impl AgentStore) -> Result<Vec<AgentEntry>, RegistryError> {
    let names = store
        .agent_names()
        .map_err(|e| RegistryError::io("Failed to list agents", e))?;

    Ok(names
        .into_iter()
        .map(|name| read_entry(store, name))
        .collect())
}

fn read_entry(store: &impl AgentStore, name: String) -> AgentEntry {
    let mut problems = Vec::new();
    if !is_valid_agent_name(&name) {
        problems.push("not a valid agent name".to_string());
    }
    let mut read = |payload: Payload, default: &str| match store.read_payload(&name, payload) {
        Ok(Some(text)) => text,
        Ok(None) => default.to_string(),
        Err(e) => {
            tracing::warn!(agent = %name, payload = payload.label(), error = %format!("{e:#}"), "unreadable agent file");
            problems.push(format!("{} unreadable: {e:#}", payload.label()));
            default.to_string()
        }
    };

    let code = read(Payload::Code, "");
    let config = read(Payload::Config, DEFAULT_CONFIG);

    let status = if problems.is_empty() {
        EntryStatus::Ok
    } else {
        EntryStatus::Degraded {
            reason: problems.join("; "),
        }
    };

    AgentEntry {
        path: store.agent_path(&name),
        name,
        code,
        config,
        status,
    }
}

/// Create or fully overwrite an agent, then register it in the manifest.
///
/// `code` defaults to empty text and `config` to `{}`.
///
/// # Errors
///
/// - [`RegistryError::Validation`] for a bad name, before any I/O.
/// - [`RegistryError::Io`] if the agent's own files cannot be written.
/// - [`RegistryError::PartialSuccess`] if the files were written but the
///   manifest update failed. The files are kept.
pub fn save_agent(
    store: &impl AgentStore,
    manifests: &impl ManifestStore,
    reporter: &impl ProgressReporter,
    entry: &EntryPoint,
    name: &str,
    code: Option<&str>,
    config: Option<&str>,
) -> Result<SaveOutcome, RegistryError> {
    validate_agent_name(name)?;

    reporter.step(&format!("writing agent '{name}'..."));
    store
        .create_agent_dir(name)
        .map_err(|e| RegistryError::io(format!("Failed to create directory for '{name}'"), e))?;
    for (payload, content) in [
        (Payload::Code, code.unwrap_or_default()),
        (Payload::Config, config.unwrap_or(DEFAULT_CONFIG)),
    ] {
        store.write_payload(name, payload, content).map_err(|e| {
            RegistryError::io(format!("Failed to write {} for '{name}'", payload.label()), e)
        })?;
    }

    reporter.step("updating manifest...");
    let locator = entry.locator(name);
    let manifest_updated =
        update_manifest(manifests, |m| upsert_graph(m, name, &locator)).map_err(|cause| {
            RegistryError::PartialSuccess {
                name: name.to_string(),
                cause,
            }
        })?;

    tracing::info!(agent = name, %locator, manifest_updated, "agent saved");
    reporter.success(&format!("agent '{name}' saved"));
    Ok(SaveOutcome {
        name: name.to_string(),
        locator,
        manifest_updated,
    })
}

/// Remove an agent directory, then unregister it from the manifest.
///
/// The manifest step is best effort: a failure is returned as a warning in
/// the outcome and does not fail the delete.
///
/// # Errors
///
/// - [`RegistryError::Validation`] for a bad name.
/// - [`RegistryError::NotFound`] if the agent has no directory; nothing is
///   touched.
/// - [`RegistryError::Io`] if the directory cannot be removed.
pub fn delete_agent(
    store: &impl AgentStore,
    manifests: &impl ManifestStore,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<DeleteOutcome, RegistryError> {
    validate_agent_name(name)?;

    let exists = store
        .agent_exists(name)
        .map_err(|e| RegistryError::io(format!("Failed to look up agent '{name}'"), e))?;
    if !exists {
        return Err(RegistryError::NotFound(name.to_string()));
    }

    reporter.step(&format!("removing agent '{name}'..."));
    store
        .remove_agent(name)
        .map_err(|e| RegistryError::io(format!("Failed to remove agent '{name}'"), e))?;

    let outcome = match update_manifest(manifests, |m| remove_graph(m, name)) {
        Ok(manifest_updated) => DeleteOutcome {
            name: name.to_string(),
            manifest_updated,
            warning: None,
        },
        Err(e) => {
            let warning = format!("agent removed but manifest not updated: {e:#}");
            tracing::warn!(agent = name, error = %format!("{e:#}"), "manifest update failed after delete");
            reporter.warn(&warning);
            DeleteOutcome {
                name: name.to_string(),
                manifest_updated: false,
                warning: Some(warning),
            }
        }
    };

    tracing::info!(agent = name, manifest_updated = outcome.manifest_updated, "agent deleted");
    reporter.success(&format!("agent '{name}' deleted"));
    Ok(outcome)
}

/// Load, apply `merge`, and store only if `merge` reports a change.
fn update_manifest(
    manifests: &impl ManifestStore,
    merge: impl FnOnce(&mut RootManifest) -> bool,
) -> anyhow::Result<bool> {
    let mut manifest = manifests.load()?;
    let changed = merge(&mut manifest);
    if changed {
        manifests.store(&manifest)?;
    }
    Ok(changed)
}

/// Compare agent directories with the manifest and, with `apply`, repair it.
///
/// Repair registers every directory missing from `graphs` and drops every
/// `graphs` entry without a directory. Directories whose names fail
/// validation are never registered; they are returned in
/// [`ReconcileReport::skipped`].
///
/// # Errors
///
/// Returns [`RegistryError::Io`] if the directories or manifest cannot be
/// read, or the repaired manifest cannot be stored.
pub fn reconcile(
    store: &impl AgentStore,
    manifests: &impl ManifestStore,
    reporter: &impl ProgressReporter,
    entry: &EntryPoint,
    apply: bool,
) -> Result<ReconcileReport, RegistryError> {
    let names = store
        .agent_names()
        .map_err(|e| RegistryError::io("Failed to list agents", e))?;
    let mut manifest = manifests
        .load()
        .map_err(|e| RegistryError::io("Failed to load manifest", e))?;

    let mut drift = detect_drift(names.iter().map(String::as_str), &manifest);
    let (missing, skipped): (Vec<String>, Vec<String>) = drift
        .missing_in_manifest
        .into_iter()
        .partition(|name| is_valid_agent_name(name));
    drift.missing_in_manifest = missing;
    for name in &skipped {
        tracing::warn!(agent = %name, "directory name is not a valid agent name");
    }

    if !apply || drift.is_empty() {
        return Ok(ReconcileReport {
            drift,
            skipped,
            applied: false,
        });
    }

    reporter.step("repairing manifest...");
    for name in &drift.missing_in_manifest {
        upsert_graph(&mut manifest, name, &entry.locator(name));
    }
    for name in &drift.dangling_in_manifest {
        remove_graph(&mut manifest, name);
    }
    manifests
        .store(&manifest)
        .map_err(|e| RegistryError::io("Failed to store manifest", e))?;

    tracing::info!(
        added = drift.missing_in_manifest.len(),
        removed = drift.dangling_in_manifest.len(),
        "manifest reconciled"
    );
    reporter.success("manifest reconciled");
    Ok(ReconcileReport {
        drift,
        skipped,
        applied: true,
    })
}
