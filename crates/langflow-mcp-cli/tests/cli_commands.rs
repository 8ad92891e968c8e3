// crates/langflow-mcp-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests running the langflow-mcp binary.
// Purpose: Ensure commands report on the right stream and exit codes.
// Dependencies: langflow-mcp-cli binary, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Runs the compiled binary with a scrubbed environment and checks stdout,
//! stderr, and the exit status of each command.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Variables that would leak host configuration into the binary.
const SCRUBBED_ENV: &[&str] = &[
    "LANGFLOW_BASE_URL",
    "LANGFLOW_API_KEY",
    "LANGFLOW_TIMEOUT",
    "MCP_MODE",
    "PORT",
    "LANGFLOW_MCP_ENV",
    "LOG_LEVEL",
    "LANGFLOW_MCP_INCLUDE_DEPRECATED",
    "LANGFLOW_MCP_CONFIG",
    "RUST_LOG",
];

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_langflow-mcp"))
}

fn run(args: &[&str], cwd: &Path) -> Output {
    let mut command = Command::new(bin());
    command.args(args).current_dir(cwd);
    for key in SCRUBBED_ENV {
        command.env_remove(key);
    }
    command.output().expect("run langflow-mcp")
}

fn write_config(dir: &Path, body: &str) -> String {
    let path = dir.join("langflow-mcp.toml");
    fs::write(&path, body.trim()).expect("write config");
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const VALID_CONFIG: &str = r#"
[langflow]
base_url = "http://localhost:7860"
api_key = "test-key"
"#;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn version_prints_package_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--version"], dir.path());
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("langflow-mcp {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn tools_prints_catalog_json() {
    let dir = tempfile::tempdir().unwrap();
    let all = run(&["tools"], dir.path());
    assert!(all.status.success());
    let all: Value = serde_json::from_str(&stdout(&all)).unwrap();
    let visible = run(&["tools", "--hide-deprecated"], dir.path());
    let visible: Value = serde_json::from_str(&stdout(&visible)).unwrap();
    let all = all.as_array().unwrap();
    let visible = visible.as_array().unwrap();
    assert!(visible.len() < all.len());
    assert!(visible.iter().all(|tool| {
        !tool["description"].as_str().unwrap_or_default().starts_with("[DEPRECATED]")
    }));
    assert!(all.iter().any(|tool| tool["name"] == "list_flows"));
}

#[test]
fn config_validate_accepts_complete_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), VALID_CONFIG);
    let output = run(&["config", "validate", "--config", &path], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "config ok");
}

#[test]
fn config_validate_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[langflow]\nbase_url = \"http://localhost:7860\"");
    let output = run(&["config", "validate", "--config", &path], dir.path());
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("LANGFLOW_API_KEY or langflow.api_key must be set"));
}

#[test]
fn serve_rejects_non_loopback_bind() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!("{VALID_CONFIG}\n[server]\ntransport = \"http\"\nbind = \"0.0.0.0:8080\"\n");
    let path = write_config(dir.path(), &body);
    let output = run(&["serve", "--config", &path], dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("non-loopback bind requires server.allow_non_loopback"));
}

#[test]
fn healthcheck_reports_stdio_as_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), VALID_CONFIG);
    let output = run(&["healthcheck", "--config", &path], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "healthy (stdio transport)");
}

#[test]
fn default_config_file_is_discovered() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), VALID_CONFIG);
    let output = run(&["config", "validate"], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
}
