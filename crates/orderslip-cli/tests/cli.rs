//! Smoke tests for the orderslip binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("orderslip")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run").and(predicate::str::contains("all")));
}

#[test]
fn test_missing_paths_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("orderslip")
        .unwrap()
        .current_dir(dir.path())
        .args(["run", "cb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paths.json"));
}

#[test]
fn test_run_over_empty_input_dir_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    fs::create_dir_all(&config).unwrap();
    fs::create_dir_all(dir.path().join("in/cb")).unwrap();

    fs::write(
        config.join("paths.json"),
        r#"{"paths": {"input_cb": "in/cb", "output_cb": "out/cb"}}"#,
    )
    .unwrap();
    fs::write(
        config.join("column_map_cb.json"),
        r#"{
            "sheet_name": "Sheet1",
            "header_row": 2,
            "columns": {
                "quantity_candidates": ["SL"],
                "product_name": "Tên hàng"
            },
            "defaults": {"tax": 0}
        }"#,
    )
    .unwrap();

    Command::cargo_bin("orderslip")
        .unwrap()
        .current_dir(dir.path())
        .args(["run", "cb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 files seen"));

    // The run touches the log even when no file matched
    assert!(dir.path().join("out/cb/parse_cb.log").exists());
}
