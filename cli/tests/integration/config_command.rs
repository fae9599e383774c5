//! Integration tests for `studio config`.
//!
//! Tests that set env overrides are serialized so they never interleave.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

fn studio() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("studio"));
    cmd.env("NO_COLOR", "1")
        .env_remove("STUDIO_ROOT")
        .env_remove("STUDIO_API_URL");
    cmd
}

fn temp_config(contents: Option<&str>) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("studio.yaml");
    if let Some(text) = contents {
        std::fs::write(&path, text).expect("write config");
    }
    (dir, path)
}

#[test]
fn config_help_shows_subcommands() {
    studio()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn show_without_file_uses_defaults() {
    let (_dir, path) = temp_config(None);
    studio()
        .args(["config", "show"])
        .env("STUDIO_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8123"))
        .stdout(predicate::str::contains("using defaults"));
}

#[test]
fn show_reads_file_values() {
    let (_dir, path) = temp_config(Some("api_url: http://runs.internal:9000\nentry_symbol: graph\n"));
    studio()
        .args(["config", "show"])
        .env("STUDIO_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("http://runs.internal:9000"))
        .stdout(predicate::str::contains("graph"));
}

#[test]
#[serial]
fn env_and_flag_overrides_apply_in_order() {
    let (_dir, path) = temp_config(Some("api_url: http://from-file:1\n"));

    let output = studio()
        .args(["--json", "config", "show"])
        .env("STUDIO_CONFIG", &path)
        .env("STUDIO_API_URL", "http://from-env:2")
        .output()
        .expect("run");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(value["config"]["api_url"], "http://from-env:2");

    let output = studio()
        .args(["--json", "--api-url", "http://from-flag:3", "config", "show"])
        .env("STUDIO_CONFIG", &path)
        .env("STUDIO_API_URL", "http://from-env:2")
        .output()
        .expect("run");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(value["config"]["api_url"], "http://from-flag:3");
}

#[test]
fn path_prints_config_location() {
    let (_dir, path) = temp_config(None);
    studio()
        .args(["config", "path"])
        .env("STUDIO_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("studio.yaml"));
}

#[test]
fn invalid_config_fails_with_field_name() {
    let (_dir, path) = temp_config(Some("api_url: localhost:8123\n"));
    studio()
        .args(["config", "show"])
        .env("STUDIO_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

#[test]
fn malformed_yaml_fails() {
    let (_dir, path) = temp_config(Some("api_url: [unterminated\n"));
    studio()
        .args(["config", "show"])
        .env("STUDIO_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}
