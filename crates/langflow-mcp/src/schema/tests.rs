// crates/langflow-mcp/src/schema/tests.rs
// ============================================================================
// Module: Schema Unit Tests
// Description: Rule checks, defaults, strictness, and schema rendering.
// Purpose: Validate the declarative validator independent of any one tool.
// Dependencies: langflow-mcp
// ============================================================================

//! ## Overview
//! Exercises each rule kind, issue paths, and JSON Schema rendering.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn issues(schema: &ObjectSchema, input: &Value) -> Vec<(String, String)> {
    schema
        .validate(input)
        .unwrap_err()
        .issues()
        .iter()
        .map(|issue| (issue.path.clone(), issue.message.clone()))
        .collect()
}

fn issue(path: &str, message: &str) -> (String, String) {
    (path.to_string(), message.to_string())
}

fn paging() -> ObjectSchema {
    ObjectSchema::strict()
        .optional("page", Rule::page(), "Page number")
        .optional("size", Rule::page_size("Page size cannot exceed 100"), "Page size")
}

// ============================================================================
// SECTION: Scalars
// ============================================================================

#[test]
fn missing_required_field_is_reported() {
    let schema = ObjectSchema::strict().required("flow_id", Rule::uuid("Invalid flow ID format"), "");
    assert_eq!(issues(&schema, &json!({})), vec![issue("flow_id", "Required")]);
}

#[test]
fn uuid_rule_accepts_only_hyphenated_form() {
    let schema = ObjectSchema::strict().required("id", Rule::uuid("Invalid ID"), "");
    assert!(schema.validate(&json!({ "id": ID })).is_ok());
    assert!(schema.validate(&json!({ "id": ID.to_uppercase() })).is_ok());
    for bad in ["3fa85f6457174562b3fc2c963f66afa6", "not-a-uuid", "{3fa85f64-5717-4562-b3fc-2c963f66afa6}"] {
        assert_eq!(issues(&schema, &json!({ "id": bad })), vec![issue("id", "Invalid ID")]);
    }
}

#[test]
fn type_mismatch_names_both_types() {
    let schema = ObjectSchema::strict().required("name", Rule::text(), "");
    assert_eq!(
        issues(&schema, &json!({ "name": 5 })),
        vec![issue("name", "Expected string, received number")]
    );
    assert_eq!(
        issues(&schema, &json!({ "name": null })),
        vec![issue("name", "Expected string, received null")]
    );
}

#[test]
fn name_rule_enforces_both_bounds() {
    let schema = ObjectSchema::strict().required("name", Rule::name("Name is required", "Name too long"), "");
    assert_eq!(issues(&schema, &json!({ "name": "" })), vec![issue("name", "Name is required")]);
    let long = "x".repeat(MAX_NAME_LENGTH + 1);
    assert_eq!(issues(&schema, &json!({ "name": long })), vec![issue("name", "Name too long")]);
    let exact = "é".repeat(MAX_NAME_LENGTH);
    assert!(schema.validate(&json!({ "name": exact })).is_ok());
}

#[test]
fn paging_bounds() {
    let schema = paging();
    assert_eq!(issues(&schema, &json!({ "page": 0 })), vec![issue(
        "page",
        "Number must be greater than 0"
    )]);
    assert_eq!(issues(&schema, &json!({ "page": -1 })), vec![issue(
        "page",
        "Number must be greater than 0"
    )]);
    assert_eq!(issues(&schema, &json!({ "page": 1.5 })), vec![issue(
        "page",
        "Expected integer, received float"
    )]);
    assert_eq!(issues(&schema, &json!({ "size": 101 })), vec![issue(
        "size",
        "Page size cannot exceed 100"
    )]);
    let accepted = schema.validate(&json!({ "page": 1, "size": 100 })).unwrap();
    assert_eq!(accepted.get("size"), Some(&json!(100)));
}

#[test]
fn integral_floats_are_normalised() {
    let accepted = paging().validate(&json!({ "page": 2.0 })).unwrap();
    assert_eq!(accepted.get("page"), Some(&json!(2)));
}

#[test]
fn choice_reports_allowed_values() {
    let schema = ObjectSchema::strict().defaulted(
        "event_delivery",
        Rule::choice(&["polling", "streaming", "direct"]),
        json!("polling"),
        "",
    );
    let defaulted = schema.validate(&json!({})).unwrap();
    assert_eq!(defaulted.get("event_delivery"), Some(&json!("polling")));
    assert_eq!(issues(&schema, &json!({ "event_delivery": "push" })), vec![issue(
        "event_delivery",
        "Invalid enum value. Expected 'polling' | 'streaming' | 'direct', received 'push'"
    )]);
}

// ============================================================================
// SECTION: Containers
// ============================================================================

#[test]
fn list_elements_are_addressed_by_index() {
    let schema = ObjectSchema::strict().required(
        "flow_ids",
        Rule::non_empty_list(Rule::uuid("Invalid flow ID format"), "At least one flow ID is required"),
        "",
    );
    assert_eq!(issues(&schema, &json!({ "flow_ids": [] })), vec![issue(
        "flow_ids",
        "At least one flow ID is required"
    )]);
    assert_eq!(issues(&schema, &json!({ "flow_ids": [ID, "bad", ID, "worse"] })), vec![
        issue("flow_ids.1", "Invalid flow ID format"),
        issue("flow_ids.3", "Invalid flow ID format"),
    ]);
    assert!(schema.validate(&json!({ "flow_ids": [ID] })).is_ok());
}

#[test]
fn nested_open_objects_drop_unknown_keys() {
    let inner = ObjectSchema::open().optional("input_value", Rule::text(), "");
    let schema = ObjectSchema::strict().required("input_request", Rule::object(inner), "");
    let accepted =
        schema.validate(&json!({ "input_request": { "input_value": "hi", "extra": 1 } })).unwrap();
    assert_eq!(accepted.get("input_request"), Some(&json!({ "input_value": "hi" })));
    assert_eq!(issues(&schema, &json!({ "input_request": { "input_value": 3 } })), vec![issue(
        "input_request.input_value",
        "Expected string, received number"
    )]);
}

#[test]
fn strict_objects_report_unknown_keys() {
    assert_eq!(issues(&paging(), &json!({ "page": 1, "sneaky": true })), vec![issue(
        "",
        "Unrecognized key: \"sneaky\""
    )]);
}

#[test]
fn non_object_arguments_are_rejected() {
    assert_eq!(issues(&paging(), &json!([1, 2])), vec![issue("", "Expected object, received array")]);
}

#[test]
fn cross_field_rule_runs_alongside_field_checks() {
    let schema = ObjectSchema::strict()
        .required("flow_id", Rule::uuid("Invalid flow ID format"), "")
        .optional("name", Rule::text(), "")
        .optional("description", Rule::text(), "")
        .at_least_one_of(&["name", "description"], EMPTY_UPDATE_MESSAGE);
    assert_eq!(issues(&schema, &json!({ "flow_id": "bad" })), vec![
        issue("flow_id", "Invalid flow ID format"),
        issue("", EMPTY_UPDATE_MESSAGE),
    ]);
    assert!(schema.validate(&json!({ "flow_id": ID, "description": "d" })).is_ok());
}

// ============================================================================
// SECTION: Files
// ============================================================================

#[test]
fn file_names_reject_traversal_and_reserved_names() {
    let schema = ObjectSchema::strict().required("file_name", Rule::file_name(), "");
    for bad in [
        "../etc/passwd",
        "dir/file.txt",
        "dir\\file.txt",
        "a..b",
        "bell\u{7}.txt",
        "what?.txt",
        "CON",
        "nul.txt",
        "com1.log",
        "LPT9",
    ] {
        assert_eq!(
            issues(&schema, &json!({ "file_name": bad })),
            vec![issue("file_name", INVALID_FILE_NAME_MESSAGE)],
            "{bad}"
        );
    }
    for good in ["report.pdf", "CONSOLE.txt", "com10.log", "data.backup.json"] {
        assert!(schema.validate(&json!({ "file_name": good })).is_ok(), "{good}");
    }
    assert_eq!(issues(&schema, &json!({ "file_name": "" })), vec![issue(
        "file_name",
        "Filename is required"
    )]);
}

#[test]
fn payload_rule_checks_estimated_size() {
    let schema = ObjectSchema::strict().required(
        "file_content",
        Rule::payload("File content is required", 6),
        "",
    );
    assert!(schema.validate(&json!({ "file_content": "AAAAAAAA" })).is_ok());
    assert_eq!(issues(&schema, &json!({ "file_content": "AAAAAAAAAAAA" })), vec![issue(
        "file_content",
        "File size exceeds limit of 6 bytes"
    )]);
    assert_eq!(issues(&schema, &json!({ "file_content": "" })), vec![issue(
        "file_content",
        "File content is required"
    )]);
}

#[test]
fn raw_payload_rule_counts_literal_bytes() {
    let schema = ObjectSchema::strict().required(
        "content",
        Rule::raw_payload("File content required", 8),
        "",
    );
    assert!(schema.validate(&json!({ "content": "01234567" })).is_ok());
    assert_eq!(issues(&schema, &json!({ "content": "012345678" })), vec![issue(
        "content",
        "File size exceeds limit of 8 bytes"
    )]);
    assert_eq!(issues(&schema, &json!({ "content": "ééééé" })), vec![issue(
        "content",
        "File size exceeds limit of 8 bytes"
    )]);
    assert_eq!(issues(&schema, &json!({ "content": "" })), vec![issue(
        "content",
        "File content required"
    )]);
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn json_schema_reflects_declarations() {
    let schema = ObjectSchema::strict()
        .required("flow_id", Rule::uuid("Invalid flow ID format"), "The flow")
        .optional("size", Rule::page_size("Page size cannot exceed 100"), "")
        .defaulted("stream", Rule::boolean(), json!(false), "Stream output")
        .json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["additionalProperties"], false);
    assert_eq!(schema["required"], json!(["flow_id"]));
    assert_eq!(schema["properties"]["flow_id"]["format"], "uuid");
    assert_eq!(schema["properties"]["flow_id"]["description"], "The flow");
    assert_eq!(schema["properties"]["size"]["maximum"], 100);
    assert_eq!(schema["properties"]["stream"]["default"], false);
    assert!(schema["properties"]["size"].get("description").is_none());
}

#[test]
fn empty_schema_has_no_required_list() {
    let schema = ObjectSchema::strict().json_schema();
    assert!(schema.get("required").is_none());
    assert_eq!(schema["properties"], json!({}));
}
