//! Tests for the `split-request` binary.

#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const DOCUMENT: &str = r#"
title: Office_ARC.rvt
path_name: 'C:\Office\Office_ARC.rvt'
links:
  - title: Office_STR.rvt
    path_name: 'C:\Office\Links\Office_STR.rvt'
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn split_request() -> Command {
    Command::new(env!("CARGO_BIN_EXE_split-request"))
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_split_prints_partitions() {
    let dir = TempDir::new().unwrap();
    let request = write(
        &dir,
        "request.yaml",
        r#"
type: LogicalAndRequest
requests:
  - type: FilterByLink
    link_name: Office_STR
  - type: Filter
    name: FilterByCategory
"#,
    );
    let document = write(&dir, "document.yaml", DOCUMENT);

    let output = split_request()
        .arg("--request")
        .arg(&request)
        .arg("--document")
        .arg(&document)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(
        json["partitions"][r"C:\Office\Links\Office_STR.rvt"]["name"],
        "FilterByCategory"
    );
    assert_eq!(json["diagnostics"][0]["severity"], "warning");
    assert!(json.get("error").is_none());
}

#[test]
fn test_unknown_link_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let request = write(
        &dir,
        "request.json",
        r#"{
            "type": "LogicalAndRequest",
            "requests": [
                {"type": "FilterByLink", "link_name": "Landscape.rvt"},
                {"type": "Filter", "name": "FilterByCategory"}
            ]
        }"#,
    );
    let document = write(&dir, "document.yml", DOCUMENT);

    let output = split_request()
        .arg("--request")
        .arg(&request)
        .arg("--document")
        .arg(&document)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("does not contain link named landscape.rvt"))
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert!(json["error"].is_string());
    assert!(json.get("partitions").is_none());
}

#[test]
fn test_validate_only_rejects_negated_link() {
    let dir = TempDir::new().unwrap();
    let request = write(
        &dir,
        "request.yaml",
        r#"
type: LogicalNotRequest
request:
  type: FilterByLink
  link_name: Office_STR.rvt
"#,
    );

    let output = split_request()
        .arg("--request")
        .arg(&request)
        .arg("--validate-only")
        .assert()
        .code(1)
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert_eq!(json["diagnostics"][0]["severity"], "error");
}

#[test]
fn test_missing_document_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let request = write(&dir, "request.yaml", "type: Filter\nname: FilterByCategory\n");

    split_request()
        .arg("--request")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--document"));
}
