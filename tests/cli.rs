//! End-to-end tests for the `classmerge` binary

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in `dir` with user config isolated to `dir`.
fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_classmerge"))
        .args(args)
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_merge_literals() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["merge", "--", "px-2 py-1", "p-4", "-mt-2"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "p-4 -mt-2");
}

#[test]
fn test_merge_json_inputs() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &dir,
        &["merge", "--json", "--", r#"["a","b"]"#, r#"{"c":true,"d":false}"#, "null", "3"],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a b c");
}

#[test]
fn test_merge_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["merge", "--json", "--", "{not json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"), "stderr: {}", stderr);
}

#[test]
fn test_merge_without_inputs_prints_empty_line() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["merge"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_merge_uses_project_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".classmerge.toml"), "prefix = \"tw-\"\n").unwrap();

    let output = run(&dir, &["merge", "--", "tw-p-2 p-2 tw-p-4"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "p-2 tw-p-4");
}

#[test]
fn test_merge_cli_separator() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["merge", "--separator", "_", "--", "hover_p-2 hover_p-4"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "hover_p-4");
}

#[test]
fn test_explain_json() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["explain", "--", "text-red-500 text-blue-500"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("explain prints JSON");
    assert_eq!(json["merged"], "text-blue-500");
    assert_eq!(json["tokens"][0]["decision"], "overridden");
    assert_eq!(json["tokens"][0]["winner"], "text-blue-500");
    assert_eq!(json["tokens"][1]["decision"], "kept");
}

#[test]
fn test_explain_human() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["explain", "--human", "--", "p-2 p-4"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Merged: p-4"));
    assert!(text.contains("--- Family Table ---"));
}

#[test]
fn test_families_json() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["families", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(json["families"]["padding"]["conflicts"].is_array());
}

#[test]
fn test_families_human() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["families"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Utility families"));
    assert!(text.contains("padding-x"));
}

#[test]
fn test_verify_valid_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".classmerge.toml"), "separator = \"_\"\n").unwrap();

    let output = run(&dir, &["verify"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration valid"));
}

#[test]
fn test_verify_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["verify"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "stderr: {}", stderr);
}

#[test]
fn test_verify_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".classmerge.toml"),
        "[families.padding]\nconflicts = [\"nope\"]\n",
    )
    .unwrap();

    let output = run(&dir, &["verify"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope"), "stderr: {}", stderr);
}

#[test]
fn test_config_reports_sources() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["config", "--prefix", "tw-"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["config"]["prefix"], "tw-");
    assert_eq!(json["sources"][0]["origin"], "builtin");
    assert_eq!(json["sources"][1]["origin"], "cli");
}
