//! Exit codes and messages of the `screenlapse` binary.
//!
//! Only the paths that end before capturing starts are covered here.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn screenlapse(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_screenlapse"))
        .args(args)
        .output()
        .expect("failed to launch screenlapse")
}

fn with_config(json: &str) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lapse.json");
    fs::write(&path, json).unwrap();
    screenlapse(&[&path])
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn no_arguments_prints_usage() {
    let output = screenlapse(&[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ScreenLapse "));
    assert!(stdout.contains("screenlapse <config path>"));
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let output = screenlapse(&[&path]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist."));
}

#[test]
fn unreadable_config() {
    let dir = tempfile::tempdir().unwrap();

    let output = screenlapse(&[dir.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unable to read"));
}

#[test]
fn missing_output() {
    let output = with_config(r#"{ "interval": 1000 }"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No output format specified."));
}

#[test]
fn invalid_output_template() {
    let output = with_config(r#"{ "output": "shot.png", "interval": 1000 }"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid output format specified"));
}

#[test]
fn missing_interval() {
    let output = with_config(r#"{ "output": "shot-{0}.png" }"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No interval specified."));
}

#[test]
fn zero_interval() {
    let output = with_config(r#"{ "output": "shot-{0}.png", "interval": 0 }"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No interval specified."));
}

#[test]
fn malformed_json() {
    let output = with_config("{ not json");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unable to parse"));
}

#[test]
fn malformed_pattern() {
    let output = with_config(r#"{ "output": "shot-{0}.png", "interval": 1000, "include": ["("] }"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid pattern"));
}
