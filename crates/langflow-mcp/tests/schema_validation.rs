// crates/langflow-mcp/tests/schema_validation.rs
// ============================================================================
// Module: Schema Boundary Tests
// Description: Boundary checks on registered tool schemas.
// Purpose: Verify pagination, update, identifier, and file name limits.
// Dependencies: langflow-mcp
// ============================================================================

//! ## Overview
//! Validates arguments against the registered schemas directly, without a
//! remote call, to pin the boundary values each tool accepts.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use langflow_mcp::ToolRegistry;
use langflow_mcp::ValidationFailure;
use langflow_mcp::schema::EMPTY_UPDATE_MESSAGE;
use langflow_mcp::schema::INVALID_FILE_NAME_MESSAGE;
use langflow_mcp::schema::ValidatedArguments;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const FLOW_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn validate(tool: &str, arguments: &Value) -> Result<ValidatedArguments, ValidationFailure> {
    let registry = ToolRegistry::new(1024);
    registry.get(tool).unwrap().schema.validate(arguments)
}

fn messages(tool: &str, arguments: &Value) -> Vec<String> {
    validate(tool, arguments)
        .unwrap_err()
        .issues()
        .iter()
        .map(|issue| issue.message.clone())
        .collect()
}

// ============================================================================
// SECTION: Pagination
// ============================================================================

#[test]
fn page_must_be_positive_integer() {
    assert_eq!(messages("list_flows", &json!({"page": 0})), vec!["Number must be greater than 0"]);
    assert_eq!(messages("list_flows", &json!({"page": -1})), vec!["Number must be greater than 0"]);
    assert_eq!(
        messages("list_flows", &json!({"page": 1.5})),
        vec!["Expected integer, received float"]
    );
    assert!(validate("list_flows", &json!({"page": 1})).is_ok());
}

#[test]
fn page_size_is_capped_at_one_hundred() {
    assert_eq!(messages("list_flows", &json!({"size": 101})), vec!["Page size cannot exceed 100"]);
    assert!(validate("list_flows", &json!({"size": 100})).is_ok());
    assert_eq!(
        messages("list_projects", &json!({"size": 101})),
        vec!["Page size cannot exceed 100"]
    );
}

#[test]
fn page_must_be_a_number() {
    assert_eq!(
        messages("list_folders", &json!({"page": "2"})),
        vec!["Expected number, received string"]
    );
}

#[test]
fn issues_accumulate_across_fields() {
    let issues = messages("list_flows", &json!({"page": 0, "size": 101}));
    assert_eq!(issues, vec!["Number must be greater than 0", "Page size cannot exceed 100"]);
}

// ============================================================================
// SECTION: Updates
// ============================================================================

#[test]
fn update_without_fields_is_rejected() {
    for (tool, key) in [
        ("update_flow", "flow_id"),
        ("update_folder", "folder_id"),
        ("update_project", "project_id"),
        ("update_variable", "variable_id"),
        ("update_user", "user_id"),
    ] {
        assert_eq!(messages(tool, &json!({ key: FLOW_ID })), vec![EMPTY_UPDATE_MESSAGE], "{tool}");
    }
}

#[test]
fn update_with_one_field_is_accepted() {
    assert!(validate("update_flow", &json!({"flow_id": FLOW_ID, "name": "Renamed"})).is_ok());
    assert!(validate("update_flow", &json!({"flow_id": FLOW_ID, "description": ""})).is_ok());
}

#[test]
fn update_name_bounds_apply() {
    let long = "x".repeat(256);
    assert_eq!(
        messages("update_flow", &json!({"flow_id": FLOW_ID, "name": long})),
        vec!["Flow name too long"]
    );
    assert_eq!(
        messages("update_flow", &json!({"flow_id": FLOW_ID, "name": ""})),
        vec!["Flow name is required"]
    );
    let max = "x".repeat(255);
    assert!(validate("update_flow", &json!({"flow_id": FLOW_ID, "name": max})).is_ok());
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

#[test]
fn identifiers_must_be_hyphenated_uuids() {
    assert_eq!(messages("get_flow", &json!({"flow_id": "abc"})), vec!["Invalid flow ID format"]);
    assert_eq!(messages("get_folder", &json!({"folder_id": "abc"})), vec!["Invalid folder ID format"]);
    assert_eq!(messages("get_user", &json!({"user_id": 42})), vec!["Expected string, received number"]);
    assert!(validate("get_flow", &json!({"flow_id": FLOW_ID})).is_ok());
}

#[test]
fn required_fields_are_reported() {
    assert_eq!(messages("get_flow", &json!({})), vec!["Required"]);
}

// ============================================================================
// SECTION: Files
// ============================================================================

#[test]
fn file_names_reject_traversal_and_separators() {
    for bad in ["../secret", "a/b.txt", "a\\b.txt", "..", "con\0.txt"] {
        let issues = messages(
            "download_file",
            &json!({"flow_id": FLOW_ID, "file_name": bad}),
        );
        assert_eq!(issues, vec![INVALID_FILE_NAME_MESSAGE], "{bad}");
    }
    assert!(validate("download_file", &json!({"flow_id": FLOW_ID, "file_name": "report.pdf"})).is_ok());
}

#[test]
fn upload_content_is_size_checked_before_decoding() {
    let oversized = "A".repeat(4096);
    let issues = messages(
        "upload_file",
        &json!({"flow_id": FLOW_ID, "file_name": "a.bin", "file_content": oversized}),
    );
    assert_eq!(issues, vec!["File size exceeds limit of 1024 bytes"]);
}

#[test]
fn upload_content_is_required() {
    let issues = messages(
        "upload_file",
        &json!({"flow_id": FLOW_ID, "file_name": "a.bin", "file_content": ""}),
    );
    assert_eq!(issues, vec!["File content is required"]);
}

#[test]
fn inline_file_requires_name_and_content() {
    let issues = messages("upload_flow", &json!({"file": {"name": "", "content": ""}}));
    assert_eq!(issues, vec!["Filename required", "File content required"]);
}

#[test]
fn inline_flow_content_is_size_checked() {
    let registry = ToolRegistry::new(8);
    let schema = &registry.get("upload_flow").unwrap().schema;
    let failure =
        schema.validate(&json!({"file": {"name": "f.json", "content": "0123456789abcdef"}})).unwrap_err();
    assert_eq!(failure.to_string(), "Validation error");
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(failure.issues()[0].path, "file.content");
    assert_eq!(failure.issues()[0].message, "File size exceeds limit of 8 bytes");
    assert!(schema.validate(&json!({"file": {"name": "f.json", "content": "01234567"}})).is_ok());
}

#[test]
fn inline_project_content_is_size_checked() {
    let registry = ToolRegistry::new(8);
    let schema = &registry.get("upload_project").unwrap().schema;
    let failure =
        schema.validate(&json!({"file": {"name": "p.json", "content": "0123456789abcdef"}})).unwrap_err();
    assert!(failure.has_message("File size exceeds limit of 8 bytes"));
    assert_eq!(failure.issues().len(), 1);
}

// ============================================================================
// SECTION: Enumerations
// ============================================================================

#[test]
fn event_delivery_accepts_known_modes() {
    assert!(validate("get_build_status", &json!({"job_id": "j", "event_delivery": "streaming"})).is_ok());
    assert_eq!(
        messages("get_build_status", &json!({"job_id": "j", "event_delivery": "push"})),
        vec!["Invalid enum value. Expected 'polling' | 'streaming' | 'direct', received 'push'"]
    );
}

#[test]
fn defaults_are_applied() {
    let validated = validate("run_flow", &json!({"flow_id_or_name": "x", "input_request": {}})).unwrap();
    assert_eq!(validated.get("stream"), Some(&json!(false)));
}
