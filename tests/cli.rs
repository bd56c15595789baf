//! Tests of the `mojebanka_converter` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn converter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mojebanka_converter"))
}

#[test]
fn test_help() {
    converter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--encoding"));
}

#[test]
fn test_no_valid_files_prints_usage() {
    let dir = tempdir().unwrap();

    converter()
        .current_dir(dir.path())
        .args(["missing.txt", "also-missing.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No valid input files"))
        .stdout(predicate::str::contains("Usage"));

    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_default_format_is_qif() {
    let dir = tempdir().unwrap();
    common::write_statement(dir.path(), "vypis.txt");

    converter()
        .current_dir(dir.path())
        .args(["vypis.txt", "missing.txt", "vypis.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converting file vypis.txt..."));

    let outputs = common::outputs(dir.path());
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].extension().unwrap(), "qif");
    assert!(fs::read_to_string(&outputs[0]).unwrap().starts_with("!Type:Bank\n"));
}

#[test]
fn test_table_into_output_dir() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    let input = common::write_statement(dir.path(), "vypis.txt");

    converter()
        .args(["-f", "cvs", "--output-dir"])
        .arg(out.path())
        .arg(&input)
        .assert()
        .success();

    let outputs = common::outputs(out.path());
    assert_eq!(outputs.len(), 1);
    let content = fs::read_to_string(&outputs[0]).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_unknown_format_fails() {
    let dir = tempdir().unwrap();
    let input = common::write_statement(dir.path(), "vypis.txt");

    converter()
        .current_dir(dir.path())
        .args(["--format", "xml"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format: xml"));

    assert!(common::outputs(dir.path()).is_empty());
}
