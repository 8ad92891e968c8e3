// crates/langflow-mcp/src/registry.rs
// ============================================================================
// Module: Tool Registry
// Description: Static catalog of Langflow tools, schemas, and handlers.
// Purpose: Bind every tool name to its validator and remote operation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each [`ToolSpec`] pairs an [`ObjectSchema`] with a handler that reshapes
//! validated arguments into an [`Operation`]. The registry is assembled once
//! from the per-group catalogs below and is read-only afterwards. The same
//! schema that validates a call renders the tool's `inputSchema`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::file_guard::FileSizeGuard;
use crate::operation::FilePayload;
use crate::operation::FileUpload;
use crate::operation::Operation;
use crate::schema::ObjectSchema;
use crate::schema::Rule;
use crate::schema::ValidatedArguments;
use crate::tools::ToolError;

mod admin;
mod execution;
mod flows;
mod storage;
mod store;
mod workspace;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Reshapes validated arguments into a remote operation.
pub type ToolHandler = fn(ValidatedArguments, &FileSizeGuard) -> Result<Operation, ToolError>;

/// Registered tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Argument validator.
    pub schema: ObjectSchema,
    /// Hidden when deprecated tools are disabled.
    pub deprecated: bool,
    /// Argument reshaping.
    pub handler: ToolHandler,
    /// Acknowledgement returned instead of the remote body.
    pub ack: Option<&'static str>,
}

impl ToolSpec {
    /// Declares a tool.
    fn new(
        name: &'static str,
        description: &'static str,
        schema: ObjectSchema,
        handler: ToolHandler,
    ) -> Self {
        Self { name, description, schema, deprecated: false, handler, ack: None }
    }

    /// Replaces the remote body with `{success, message}`.
    fn acknowledged(mut self, message: &'static str) -> Self {
        self.ack = Some(message);
        self
    }

    /// Marks the tool as deprecated.
    fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Renders the catalog entry.
    #[must_use]
    pub fn definition(&self) -> ToolDefinition {
        let description = if self.deprecated {
            format!("[DEPRECATED] {}", self.description)
        } else {
            self.description.to_string()
        };
        ToolDefinition {
            name: self.name.to_string(),
            description,
            input_schema: self.schema.json_schema(),
        }
    }
}

/// Tool entry as listed by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema of the arguments.
    pub input_schema: Value,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Immutable tool catalog.
///
/// # Invariants
/// - Names are unique; the first declaration wins.
/// - Catalog order follows declaration order.
#[derive(Debug)]
pub struct ToolRegistry {
    /// Tools in catalog order.
    specs: Vec<ToolSpec>,
    /// Name to position in `specs`.
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Builds the catalog; `max_file_bytes` bounds upload schemas.
    #[must_use]
    pub fn new(max_file_bytes: usize) -> Self {
        let mut specs = Vec::new();
        specs.extend(flows::specs(max_file_bytes));
        specs.extend(workspace::specs(max_file_bytes));
        specs.extend(execution::specs());
        specs.extend(storage::specs(max_file_bytes));
        specs.extend(store::specs());
        specs.extend(admin::specs());
        let mut index = HashMap::with_capacity(specs.len());
        for (position, spec) in specs.iter().enumerate() {
            index.entry(spec.name).or_insert(position);
        }
        Self { specs, index }
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).and_then(|position| self.specs.get(*position))
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true when no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterates registered tools.
    pub fn iter(&self) -> impl Iterator<Item = &ToolSpec> {
        self.specs.iter()
    }

    /// Renders the catalog; deprecated tools only when `include_deprecated`.
    #[must_use]
    pub fn catalog(&self, include_deprecated: bool) -> Vec<ToolDefinition> {
        self.specs
            .iter()
            .filter(|spec| include_deprecated || !spec.deprecated)
            .map(ToolSpec::definition)
            .collect()
    }
}

// ============================================================================
// SECTION: Shared Rules
// ============================================================================

/// Flow identifier.
const FLOW_ID: Rule = Rule::uuid("Invalid flow ID format");

/// Folder identifier.
const FOLDER_ID: Rule = Rule::uuid("Invalid folder ID format");

/// Page size capped at 100.
const PAGE_SIZE: Rule = Rule::page_size("Page size cannot exceed 100");

/// Schema for tools without arguments.
const fn no_arguments() -> ObjectSchema {
    ObjectSchema::strict()
}

// ============================================================================
// SECTION: Argument Helpers
// ============================================================================

/// Returns an optional string field.
fn optional_text(args: &ValidatedArguments, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Returns a boolean field, or `default` when absent.
fn flag(args: &ValidatedArguments, key: &str, default: bool) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Decodes `file_content` through the guard and pairs it with `file_name`.
fn base64_upload(
    args: &ValidatedArguments,
    guard: &FileSizeGuard,
) -> Result<FileUpload, ToolError> {
    let bytes = guard.validate(&args.text("file_content")?)?;
    Ok(FileUpload { file_name: args.text("file_name")?, bytes, content_type: None })
}

/// Converts the inline `file` object into an upload.
fn inline_upload(
    args: &ValidatedArguments,
    guard: &FileSizeGuard,
) -> Result<FileUpload, ToolError> {
    let payload: FilePayload = args.decode_field("file")?;
    let bytes = payload.content.into_bytes();
    guard.check_len(bytes.len())?;
    Ok(FileUpload {
        file_name: payload.name,
        bytes,
        content_type: Some(payload.media_type.unwrap_or_else(|| "application/json".to_string())),
    })
}

/// Inline `file` object field rule; `content` is capped at `max_file_bytes`.
fn inline_file_rule(max_file_bytes: usize) -> Rule {
    Rule::object(
        ObjectSchema::open()
            .required("name", Rule::required_text("Filename required"), "File name")
            .required(
                "content",
                Rule::raw_payload("File content required", max_file_bytes),
                "File content",
            )
            .optional("type", Rule::text(), "MIME type; defaults to application/json"),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
