//! Agent registry service tests against in-memory stores.

#![allow(clippy::expect_used)]

use studio_cli::application::services::registry::{
    delete_agent, list_agents, reconcile, save_agent,
};
use studio_cli::domain::agent::EntryPoint;
use studio_cli::domain::error::RegistryError;
use studio_common::EntryStatus;

use crate::helpers::{MemoryAgentStore, MemoryManifestStore, RecordingReporter};

const LOCATOR_A: &str = "./agents/a/agent.py:app";

fn save(
    store: &MemoryAgentStore,
    manifests: &MemoryManifestStore,
    name: &str,
    code: Option<&str>,
    config: Option<&str>,
) -> Result<studio_cli::application::services::registry::SaveOutcome, RegistryError> {
    save_agent(
        store,
        manifests,
        &RecordingReporter::default(),
        &EntryPoint::default(),
        name,
        code,
        config,
    )
}

// ── save ─────────────────────────────────────────────────────────────────────

#[test]
fn save_then_list_includes_agent_and_registers_locator() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();

    let outcome = save(&store, &manifests, "a", Some("print(1)"), Some("{}")).expect("save");
    assert_eq!(outcome.locator, LOCATOR_A);
    assert!(outcome.manifest_updated);

    let agents = list_agents(&store).expect("list");
    let a = agents.iter().find(|e| e.name == "a").expect("listed");
    assert_eq!(a.code, "print(1)");
    assert_eq!(a.config, "{}");
    assert!(a.status.is_ok());
    assert_eq!(manifests.snapshot().graphs["a"], LOCATOR_A);
}

#[test]
fn save_defaults_missing_payloads() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();

    save(&store, &manifests, "a", None, None).expect("save");
    let stored = store.get("a").expect("stored");
    assert_eq!(stored.code.as_deref(), Some(""));
    assert_eq!(stored.config.as_deref(), Some("{}"));
}

#[test]
fn save_overwrites_existing_agent() {
    let store = MemoryAgentStore::default().with_agent("a", "old", "{\"x\": 1}");
    let manifests = MemoryManifestStore::default();

    save(&store, &manifests, "a", Some("new"), None).expect("save");
    let stored = store.get("a").expect("stored");
    assert_eq!(stored.code.as_deref(), Some("new"));
    assert_eq!(stored.config.as_deref(), Some("{}"));
}

#[test]
fn resave_does_not_rewrite_unchanged_manifest() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();

    save(&store, &manifests, "a", None, None).expect("first save");
    let second = save(&store, &manifests, "a", Some("x"), None).expect("second save");
    assert!(!second.manifest_updated);
    assert_eq!(manifests.store_count(), 1);
}

#[test]
fn save_with_empty_name_fails_before_io() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();

    let err = save(&store, &manifests, "", Some("x"), None).expect_err("must fail");
    assert!(matches!(err, RegistryError::Validation(_)));
    assert_eq!(store.write_count(), 0);
    assert_eq!(manifests.store_count(), 0);
}

#[test]
fn save_with_traversal_name_fails_before_io() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();

    for name in ["../evil", "a/b", ".."] {
        let err = save(&store, &manifests, name, None, None).expect_err("must fail");
        assert!(matches!(err, RegistryError::Validation(_)), "{name}");
    }
    assert_eq!(store.write_count(), 0);
}

#[test]
fn manifest_failure_on_save_is_partial_success_with_files_kept() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::failing();

    let err = save(&store, &manifests, "a", Some("print(1)"), None).expect_err("must fail");
    match &err {
        RegistryError::PartialSuccess { name, cause } => {
            assert_eq!(name, "a");
            assert!(cause.to_string().contains("read-only"), "{cause}");
        }
        other => panic!("expected PartialSuccess, got {other:?}"),
    }
    assert!(err.to_string().contains("reconcile --apply"));

    let stored = store.get("a").expect("files kept");
    assert_eq!(stored.code.as_deref(), Some("print(1)"));
}

#[test]
fn agent_write_failure_is_io_error() {
    let store = MemoryAgentStore {
        fail_writes: true,
        ..MemoryAgentStore::default()
    };
    let manifests = MemoryManifestStore::default();

    let err = save(&store, &manifests, "a", None, None).expect_err("must fail");
    assert_eq!(err.code(), "io");
    let rendered = format!("{:#}", anyhow::Error::from(err));
    assert_eq!(rendered.matches("disk full").count(), 1, "{rendered}");
    assert!(manifests.snapshot().graphs.is_empty());
}

#[test]
fn unrelated_manifest_fields_survive_save_and_delete() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::from_json(
        r#"{"graphs": {"other": "./agents/other/agent.py:app"}, "env": ".env", "python_version": "3.12"}"#,
    );
    let reporter = RecordingReporter::default();

    save(&store, &manifests, "a", None, None).expect("save");
    delete_agent(&store, &manifests, &reporter, "a").expect("delete");

    let manifest = manifests.snapshot();
    assert_eq!(manifest.extra["env"], ".env");
    assert_eq!(manifest.extra["python_version"], "3.12");
    assert_eq!(manifest.graph_names().collect::<Vec<_>>(), vec!["other"]);
}

// ── list ─────────────────────────────────────────────────────────────────────

#[test]
fn list_of_empty_store_is_empty() {
    assert!(list_agents(&MemoryAgentStore::default()).expect("list").is_empty());
}

#[test]
fn missing_files_use_defaults() {
    let store = MemoryAgentStore::default();
    store.agents.lock().expect("lock").insert("bare".to_string(), Default::default());

    let agents = list_agents(&store).expect("list");
    assert_eq!(agents[0].code, "");
    assert_eq!(agents[0].config, "{}");
    assert_eq!(agents[0].status, EntryStatus::Ok);
}

#[test]
fn unreadable_entry_is_degraded_and_listing_continues() {
    let store = MemoryAgentStore {
        unreadable: vec![("a".to_string(), "code")],
        ..MemoryAgentStore::default()
    }
    .with_agent("a", "secret", "{\"k\": 1}")
    .with_agent("b", "print(2)", "{}");

    let agents = list_agents(&store).expect("list");
    assert_eq!(agents.len(), 2);

    let a = agents.iter().find(|e| e.name == "a").expect("a listed");
    assert_eq!(a.code, "");
    assert_eq!(a.config, "{\"k\": 1}");
    match &a.status {
        EntryStatus::Degraded { reason } => assert!(reason.contains("code"), "{reason}"),
        EntryStatus::Ok => panic!("expected degraded entry"),
    }

    let b = agents.iter().find(|e| e.name == "b").expect("b listed");
    assert!(b.status.is_ok());
}

// ── delete ───────────────────────────────────────────────────────────────────

#[test]
fn delete_removes_agent_and_graph_then_second_delete_is_not_found() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();
    let reporter = RecordingReporter::default();

    save(&store, &manifests, "a", Some("print(1)"), None).expect("save");
    let outcome = delete_agent(&store, &manifests, &reporter, "a").expect("delete");
    assert!(outcome.manifest_updated);
    assert!(outcome.warning.is_none());

    assert!(list_agents(&store).expect("list").is_empty());
    assert!(!manifests.snapshot().graphs.contains_key("a"));

    let err = delete_agent(&store, &manifests, &reporter, "a").expect_err("second delete");
    assert!(matches!(err, RegistryError::NotFound(ref n) if n == "a"));
}

#[test]
fn delete_of_missing_agent_touches_nothing() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::from_json(r#"{"graphs": {"ghost": "./agents/ghost/agent.py:app"}}"#);

    let err = delete_agent(&store, &manifests, &RecordingReporter::default(), "ghost")
        .expect_err("not found");
    assert_eq!(err.code(), "not_found");
    assert_eq!(store.write_count(), 0);
    assert!(manifests.snapshot().graphs.contains_key("ghost"));
}

#[test]
fn delete_with_empty_name_is_validation_error() {
    let err = delete_agent(
        &MemoryAgentStore::default(),
        &MemoryManifestStore::default(),
        &RecordingReporter::default(),
        "",
    )
    .expect_err("must fail");
    assert!(matches!(err, RegistryError::Validation(_)));
}

#[test]
fn manifest_failure_on_delete_is_a_warning() {
    let store = MemoryAgentStore::default().with_agent("a", "x", "{}");
    let manifests = MemoryManifestStore {
        fail_store: true,
        ..MemoryManifestStore::from_json(r#"{"graphs": {"a": "./agents/a/agent.py:app"}}"#)
    };
    let reporter = RecordingReporter::default();

    let outcome = delete_agent(&store, &manifests, &reporter, "a").expect("delete succeeds");
    assert!(!outcome.manifest_updated);
    let warning = outcome.warning.expect("warning");
    assert!(warning.contains("read-only"), "{warning}");
    assert!(store.get("a").is_none());
    assert_eq!(reporter.warnings().len(), 1);
}

// ── reconcile ────────────────────────────────────────────────────────────────

#[test]
fn reconcile_reports_drift_without_changing_anything() {
    let store = MemoryAgentStore::default().with_agent("a", "", "{}");
    let manifests =
        MemoryManifestStore::from_json(r#"{"graphs": {"gone": "./agents/gone/agent.py:app"}}"#);

    let report = reconcile(
        &store,
        &manifests,
        &RecordingReporter::default(),
        &EntryPoint::default(),
        false,
    )
    .expect("reconcile");
    assert!(!report.applied);
    assert_eq!(report.drift.missing_in_manifest, vec!["a"]);
    assert_eq!(report.drift.dangling_in_manifest, vec!["gone"]);
    assert_eq!(manifests.store_count(), 0);
}

#[test]
fn reconcile_apply_repairs_partial_save() {
    let store = MemoryAgentStore::default();
    let failing = MemoryManifestStore::failing();
    save(&store, &failing, "a", Some("print(1)"), None).expect_err("partial success");

    let manifests =
        MemoryManifestStore::from_json(r#"{"graphs": {"gone": "./agents/gone/agent.py:app"}, "env": ".env"}"#);
    let report = reconcile(
        &store,
        &manifests,
        &RecordingReporter::default(),
        &EntryPoint::default(),
        true,
    )
    .expect("reconcile");
    assert!(report.applied);

    let manifest = manifests.snapshot();
    assert_eq!(manifest.graphs["a"], LOCATOR_A);
    assert!(!manifest.graphs.contains_key("gone"));
    assert_eq!(manifest.extra["env"], ".env");
}

#[test]
fn reconcile_in_sync_does_not_store() {
    let store = MemoryAgentStore::default();
    let manifests = MemoryManifestStore::default();
    save(&store, &manifests, "a", None, None).expect("save");

    let report = reconcile(
        &store,
        &manifests,
        &RecordingReporter::default(),
        &EntryPoint::default(),
        true,
    )
    .expect("reconcile");
    assert!(report.drift.is_empty());
    assert!(!report.applied);
    assert_eq!(manifests.store_count(), 1);
}

#[test]
fn reconcile_never_registers_invalid_directory_names() {
    let store = MemoryAgentStore::default()
        .with_agent("a", "", "{}")
        .with_agent("has space", "", "{}")
        .with_agent(".hidden", "", "{}");
    let manifests = MemoryManifestStore::default();

    let report = reconcile(
        &store,
        &manifests,
        &RecordingReporter::default(),
        &EntryPoint::default(),
        true,
    )
    .expect("reconcile");
    assert!(report.applied);
    assert_eq!(report.drift.missing_in_manifest, vec!["a"]);
    assert_eq!(report.skipped, vec![".hidden", "has space"]);

    let manifest = manifests.snapshot();
    assert_eq!(manifest.graph_names().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn reconcile_with_only_invalid_names_reports_no_drift() {
    let store = MemoryAgentStore::default().with_agent("has space", "", "{}");
    let manifests = MemoryManifestStore::default();

    let report = reconcile(
        &store,
        &manifests,
        &RecordingReporter::default(),
        &EntryPoint::default(),
        true,
    )
    .expect("reconcile");
    assert!(report.drift.is_empty());
    assert_eq!(report.skipped, vec!["has space"]);
    assert_eq!(manifests.store_count(), 0);
}

#[test]
fn list_marks_invalid_directory_names_degraded() {
    let store = MemoryAgentStore::default()
        .with_agent("has space", "print(1)", "{}")
        .with_agent("ok", "", "{}");

    let agents = list_agents(&store).expect("list");
    let odd = agents.iter().find(|e| e.name == "has space").expect("listed");
    assert_eq!(odd.code, "print(1)");
    match &odd.status {
        EntryStatus::Degraded { reason } => {
            assert!(reason.contains("not a valid agent name"), "{reason}");
        }
        EntryStatus::Ok => panic!("expected degraded entry"),
    }
    let ok = agents.iter().find(|e| e.name == "ok").expect("listed");
    assert!(ok.status.is_ok());
}
