// crates/langflow-mcp/tests/catalog.rs
// ============================================================================
// Module: Catalog Schema Tests
// Description: JSON Schema compilation and agreement for every tool.
// Purpose: Keep advertised input schemas consistent with validation.
// Dependencies: langflow-mcp, jsonschema
// ============================================================================

//! ## Overview
//! Compiles every advertised `inputSchema` with `jsonschema`, derives a
//! minimal valid sample from it, and checks that the published schema and the
//! in-process validator agree on that sample and on an empty argument object.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use langflow_mcp::ToolRegistry;
use langflow_mcp::file_guard::DEFAULT_MAX_FILE_BYTES;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const SAMPLE_UUID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Builds the smallest value that satisfies `schema`.
fn sample(schema: &Value) -> Value {
    if let Some(options) = schema["enum"].as_array() {
        return options[0].clone();
    }
    match schema["type"].as_str() {
        Some("string") if schema["format"] == json!("uuid") => json!(SAMPLE_UUID),
        Some("string") => json!("sample-value"),
        Some("integer") => schema["minimum"].as_i64().map_or(json!(1), |min| json!(min.max(1))),
        Some("boolean") => json!(false),
        Some("array") => json!([sample(&schema["items"])]),
        Some("object") => sample_object(schema),
        other => panic!("unexpected schema type {other:?}"),
    }
}

/// Builds an object carrying every required property plus the first
/// `anyOf` alternative.
fn sample_object(schema: &Value) -> Value {
    let mut object = Map::new();
    let mut wanted: Vec<&str> = schema["required"]
        .as_array()
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if let Some(first) = schema["anyOf"].as_array().and_then(|alternatives| alternatives.first()) {
        wanted.extend(first["required"].as_array().unwrap().iter().filter_map(Value::as_str));
    }
    for name in wanted {
        object.insert(name.to_string(), sample(&schema["properties"][name]));
    }
    Value::Object(object)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn every_input_schema_compiles() {
    for tool in ToolRegistry::new(DEFAULT_MAX_FILE_BYTES).catalog(true) {
        let compiled = jsonschema::validator_for(&tool.input_schema);
        assert!(compiled.is_ok(), "{} schema does not compile", tool.name);
    }
}

#[test]
fn every_tool_accepts_its_derived_sample() {
    let registry = ToolRegistry::new(DEFAULT_MAX_FILE_BYTES);
    for spec in registry.iter() {
        let definition = spec.definition();
        let validator = jsonschema::validator_for(&definition.input_schema).unwrap();
        let sample = sample(&definition.input_schema);
        assert!(validator.is_valid(&sample), "{} rejects sample {sample}", spec.name);
        assert!(spec.schema.validate(&sample).is_ok(), "{} validator rejects {sample}", spec.name);
    }
}

#[test]
fn published_schema_agrees_on_empty_arguments() {
    let registry = ToolRegistry::new(DEFAULT_MAX_FILE_BYTES);
    let empty = json!({});
    for spec in registry.iter() {
        let validator = jsonschema::validator_for(&spec.definition().input_schema).unwrap();
        assert_eq!(
            validator.is_valid(&empty),
            spec.schema.validate(&empty).is_ok(),
            "{} disagrees on empty arguments",
            spec.name
        );
    }
}

#[test]
fn published_schema_rejects_unknown_keys() {
    let registry = ToolRegistry::new(DEFAULT_MAX_FILE_BYTES);
    for spec in registry.iter() {
        let schema = spec.definition().input_schema;
        let validator = jsonschema::validator_for(&schema).unwrap();
        let mut sample = sample(&schema);
        sample["__unexpected"] = json!(1);
        assert!(!validator.is_valid(&sample), "{}", spec.name);
        assert!(spec.schema.validate(&sample).is_err(), "{}", spec.name);
    }
}

#[test]
fn deprecated_descriptions_are_marked() {
    let registry = ToolRegistry::new(DEFAULT_MAX_FILE_BYTES);
    for spec in registry.iter() {
        let definition = spec.definition();
        assert_eq!(definition.description.starts_with("[DEPRECATED] "), spec.deprecated);
    }
}

#[test]
fn catalog_serializes_like_tools_list() {
    let catalog = ToolRegistry::new(DEFAULT_MAX_FILE_BYTES).catalog(false);
    let value = serde_json::to_value(&catalog).unwrap();
    for entry in value.as_array().unwrap() {
        let keys: Vec<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["description", "inputSchema", "name"]);
    }
}
