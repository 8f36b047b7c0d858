// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end tests for failscan
//!
//! These tests run the full parse-and-report flow against files on disk.


use failscan::config::Config;
use failscan_parser::{Category, ParseResult};
use tempfile::TempDir;

use fixtures::{MINIMAL_LOG, jest_sample_path, write_log};

#[test]
fn e2e_minimal_log_to_reports() {
    let (dir, log) = write_log(MINIMAL_LOG);
    let config = Config {
        log,
        output: dir.path().join("error-inventory.md"),
        no_console: true,
        ..Default::default()
    };

    let result = failscan::run(&config).expect("run should succeed");
    assert_eq!(result.stats.actual_failures, 1);
    assert_eq!(result.failures_in(Category::Unit).len(), 1);

    let md = std::fs::read_to_string(&config.output).expect("Markdown should exist");
    assert!(md.contains("## UNIT Test Errors (1)"));
    assert!(md.contains("```\nTypeError: x is not a function\n```"));

    let json = std::fs::read_to_string(config.json_output_path()).expect("JSON should exist");
    let restored: ParseResult = serde_json::from_str(&json).expect("JSON should round-trip");
    assert!(restored.same_findings(&result));
}

#[test]
fn e2e_sample_log_to_reports() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        log: jest_sample_path(),
        output: dir.path().join("inventory.md"),
        no_console: true,
        ..Default::default()
    };

    let result = failscan::run(&config).expect("run should succeed");
    assert_eq!(result.stats.total_lines, 43);
    assert_eq!(result.stats.actual_failures, 7);

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("inventory.json")).expect("JSON should exist"),
    )
    .expect("JSON should be valid");
    assert_eq!(json["stats"]["tests_failed"], 6);
    assert_eq!(json["categories"]["integration"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["categories"]["system"].as_array().map(Vec::len), Some(0));
}

#[test]
fn e2e_rerun_is_idempotent() {
    let (dir, log) = write_log(MINIMAL_LOG);
    let config = Config {
        log,
        output: dir.path().join("error-inventory.md"),
        no_console: true,
        ..Default::default()
    };

    let first = failscan::run(&config).expect("first run should succeed");
    let second = failscan::run(&config).expect("second run should succeed");
    assert!(first.same_findings(&second));
}

#[test]
fn e2e_missing_log_writes_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        log: dir.path().join("absent.log"),
        output: dir.path().join("error-inventory.md"),
        no_console: true,
        ..Default::default()
    };

    assert!(failscan::run(&config).is_err());
    assert!(!config.output.exists());
    assert!(!config.json_output_path().exists());
}

#[test]
fn e2e_unwritable_output_is_fatal() {
    let (dir, log) = write_log(MINIMAL_LOG);
    // A directory where the Markdown file should go makes the write fail
    let output = dir.path().join("error-inventory.md");
    std::fs::create_dir(&output).expect("Failed to create blocking directory");
    let config = Config {
        log,
        output,
        no_console: true,
        ..Default::default()
    };

    let err = failscan::run(&config).unwrap_err();
    assert!(err.to_string().contains("Failed to write"));
}
