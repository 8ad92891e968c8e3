// crates/langflow-mcp/src/client/tests.rs
// ============================================================================
// Module: Langflow API Client Unit Tests
// Description: URL construction, status rendering, and response decoding.
// Purpose: Validate client helpers without network access.
// Dependencies: langflow-mcp, langflow-mcp-config, serde_json
// ============================================================================

//! ## Overview
//! Covers endpoint resolution against assorted base URLs, status error text,
//! and each response interpretation mode.

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

use langflow_mcp_config::ApiKey;
use serde_json::json;

use super::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn client(base_url: &str) -> HttpLangflowClient {
    let config = LangflowApiConfig {
        base_url: Some(base_url.to_string()),
        api_key: Some(ApiKey::new("test-key")),
        ..LangflowApiConfig::default()
    };
    HttpLangflowClient::new(&config).expect("client")
}

fn segments(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_string()).collect()
}

// ============================================================================
// SECTION: Endpoints
// ============================================================================

#[test]
fn endpoint_prefixes_api_version() {
    let url = client("http://localhost:7860").endpoint(&segments(&["flows", "abc"]), "ctx");
    assert_eq!(url.expect("url").as_str(), "http://localhost:7860/api/v1/flows/abc");
}

#[test]
fn endpoint_keeps_trailing_slash_for_collections() {
    let url = client("http://localhost:7860/").endpoint(&segments(&["flows", ""]), "ctx");
    assert_eq!(url.expect("url").as_str(), "http://localhost:7860/api/v1/flows/");
}

#[test]
fn endpoint_preserves_base_path_prefix() {
    let url = client("https://host/langflow/").endpoint(&segments(&["version"]), "ctx");
    assert_eq!(url.expect("url").as_str(), "https://host/langflow/api/v1/version");
}

#[test]
fn endpoint_percent_encodes_identifiers() {
    let url = client("http://localhost:7860")
        .endpoint(&segments(&["files", "download", "f", "../etc/passwd"]), "ctx");
    assert_eq!(
        url.expect("url").as_str(),
        "http://localhost:7860/api/v1/files/download/f/..%2Fetc%2Fpasswd"
    );
}

#[test]
fn client_requires_api_key() {
    let config = LangflowApiConfig {
        base_url: Some("http://localhost:7860".to_string()),
        ..LangflowApiConfig::default()
    };
    let err = HttpLangflowClient::new(&config).expect_err("missing key");
    assert!(matches!(err, ClientInitError::ApiKey(_)));
}

#[test]
fn client_debug_hides_credentials() {
    let rendered = format!("{:?}", client("http://localhost:7860"));
    assert!(!rendered.contains("test-key"));
}

// ============================================================================
// SECTION: Status Errors
// ============================================================================

#[test]
fn status_error_renders_sanitized_json_body() {
    let body = br#"{"detail":"Flow not found","api_key":"sk-live"}"#;
    let err = ApiError::status("Failed to get flow f", 404, body);
    let message = err.to_string();
    assert!(message.starts_with("Failed to get flow f: HTTP 404 - "));
    assert!(message.contains("Flow not found"));
    assert!(message.contains("***REDACTED***"));
    assert!(!message.contains("sk-live"));
}

#[test]
fn status_error_without_body_names_the_status() {
    let err = ApiError::status("Failed to list flows", 502, b"");
    assert_eq!(
        err.to_string(),
        "Failed to list flows: HTTP 502 - Request failed with status code 502"
    );
}

#[test]
fn status_error_quotes_text_bodies() {
    let err = ApiError::status("Failed to get logs", 500, b"Internal Server Error");
    assert_eq!(err.to_string(), "Failed to get logs: HTTP 500 - \"Internal Server Error\"");
}

#[test]
fn status_error_truncates_long_text_bodies() {
    let body = "x".repeat(MAX_ERROR_TEXT_CHARS * 2);
    let err = ApiError::status("ctx", 500, body.as_bytes());
    let ApiError::Status { detail, .. } = err else {
        panic!("expected status error");
    };
    assert_eq!(detail.len(), MAX_ERROR_TEXT_CHARS + 2);
}

// ============================================================================
// SECTION: Response Decoding
// ============================================================================

#[test]
fn empty_json_body_decodes_to_null() {
    let value = decode_response(&ResponseKind::Json, None, b"", "ctx").expect("decode");
    assert_eq!(value, Value::Null);
}

#[test]
fn non_json_text_is_returned_verbatim() {
    let value = decode_response(&ResponseKind::Json, Some("text/plain"), b"log line", "ctx")
        .expect("decode");
    assert_eq!(value, json!("log line"));
}

#[test]
fn binary_body_is_base64_encoded() {
    let kind = ResponseKind::Binary { file_name: "a.bin".to_string() };
    let value = decode_response(&kind, Some("application/octet-stream"), &[0, 1, 2], "ctx")
        .expect("decode");
    assert_eq!(
        value,
        json!({
            "file_name": "a.bin",
            "content_type": "application/octet-stream",
            "size": 3,
            "content_base64": "AAEC",
        })
    );
}

#[test]
fn json_or_binary_follows_content_type() {
    let kind = ResponseKind::JsonOrBinary { file_name: "flows.zip".to_string() };
    let json_value =
        decode_response(&kind, Some("application/json"), br#"{"id":"f"}"#, "ctx").expect("json");
    assert_eq!(json_value, json!({"id": "f"}));
    let zip = decode_response(&kind, Some("application/zip"), b"PK", "ctx").expect("zip");
    assert_eq!(zip["file_name"], "flows.zip");
    assert_eq!(zip["size"], 2);
}

#[test]
fn components_are_flattened_with_category() {
    let catalog = json!({
        "inputs": {
            "ChatInput": {"display_name": "Chat Input", "description": "Chat box"},
            "TextInput": {"display_name": "", "description": "Text"},
        },
        "models": {
            "OpenAI": {}
        },
        "broken": "not an object",
    });
    let Value::Array(components) = flatten_components(catalog) else {
        panic!("expected array");
    };
    assert_eq!(components.len(), 3);
    assert!(components.contains(&json!({
        "name": "ChatInput",
        "display_name": "Chat Input",
        "description": "Chat box",
        "type": "inputs",
    })));
    assert!(components.contains(&json!({
        "name": "TextInput",
        "display_name": "TextInput",
        "description": "Text",
        "type": "inputs",
    })));
    assert!(components.contains(&json!({
        "name": "OpenAI",
        "display_name": "OpenAI",
        "description": "",
        "type": "models",
    })));
}

#[test]
fn invalid_component_catalog_is_a_decode_error() {
    let err = decode_response(&ResponseKind::Components, None, b"<html>", "Failed to list components")
        .expect_err("decode error");
    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(err.to_string().starts_with("Failed to list components: invalid component catalog"));
}
