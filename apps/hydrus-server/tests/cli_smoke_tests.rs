#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the hydrus-server binary.

use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_hydrus_server(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hydrus-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute hydrus-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_hydrus_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hydrus-server"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--auth"));
}

#[test]
fn test_cli_version_command() {
    let output = run_hydrus_server(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hydrus-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_hydrus_server(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_hydrus_server(&["--config", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_hydrus_server(&["--config", &path, "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("yaml") || stderr.contains("YAML") || stderr.contains("configuration"),
        "Should mention YAML parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_check_valid_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "valid.yaml",
        r#"
server:
  bind_addr: "127.0.0.1:0"
logging:
  level: error
hydrus:
  api_name: demoapi
  base_url: "http://localhost:8080/"
"#,
    );

    let output = run_hydrus_server(&["--config", &path, "check"]);
    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
    }
    assert!(output.status.success(), "Should succeed with valid config");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"), "{stdout}");
    assert!(stdout.contains("/demoapi"), "{stdout}");
}

#[test]
fn test_cli_check_rejects_auth_without_users() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "auth.yaml", "logging:\n  level: error\n");

    let output = run_hydrus_server(&["--config", &path, "--auth", "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no users"), "{stderr}");
}

#[test]
fn test_cli_check_rejects_bad_document() {
    let dir = TempDir::new().unwrap();
    let doc = write_config(
        &dir,
        "doc.json",
        r#"{ "collections": [ { "class": "Ghost" } ] }"#,
    );
    let path = write_config(
        &dir,
        "config.yaml",
        &format!("logging:\n  level: error\nhydrus:\n  doc_path: \"{}\"\n", doc.replace('\\', "/")),
    );

    let output = run_hydrus_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ghost"), "{stderr}");
}

#[test]
fn test_cli_run_rejects_invalid_bind_address() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "bind.yaml",
        "server:\n  bind_addr: \"not-an-address\"\nlogging:\n  level: error\n",
    );

    let output = run_hydrus_server(&["--config", &path, "run"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid bind address"), "{stderr}");
}

#[test]
fn test_cli_print_config_is_parseable_and_redacted() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "users.yaml",
        "logging:\n  level: error\nhydrus:\n  users:\n    - id: 1\n      password: hunter2\n",
    );

    let output = run_hydrus_server(&["--config", &path, "--port", "9123", "--print-config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("hunter2"));

    let parsed: serde_json::Value = serde_saphyr::from_str(&stdout).unwrap();
    assert_eq!(parsed["server"]["bind_addr"], "127.0.0.1:9123");
    assert_eq!(parsed["hydrus"]["users"][0]["id"], 1);
}
