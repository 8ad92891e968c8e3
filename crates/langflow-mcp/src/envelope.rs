// crates/langflow-mcp/src/envelope.rs
// ============================================================================
// Module: Response Envelopes
// Description: Success and error envelopes for tool invocations.
// Purpose: Render every outcome as MCP text content without leaking secrets.
// Dependencies: langflow-mcp-config, serde, serde_json, time
// ============================================================================

//! ## Overview
//! The envelope builder is the only place tool outcomes become text. Errors
//! are classified once into validation, operational, and unknown failures
//! and rendered as a pretty-printed [`ErrorDetail`]. Rendering never fails:
//! a static fallback text is used if serialization itself breaks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;

use langflow_mcp_config::DiagnosticsConfig;
use langflow_mcp_config::ExecutionMode;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::sanitize::sanitize_value;
use crate::schema::ValidationIssue;
use crate::tools::ToolError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum trace lines included outside production.
pub const MAX_STACK_LINES: usize = 5;

/// Text used when an error detail cannot be serialized.
const FALLBACK_ERROR_TEXT: &str = "{\n  \"error\": true,\n  \"message\": \"Unknown error\"\n}";

// ============================================================================
// SECTION: Envelope Types
// ============================================================================

/// Single text content segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Content type; always `text`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Rendered payload.
    pub text: String,
}

impl TextContent {
    /// Builds a text segment.
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { kind: "text".to_string(), text }
    }
}

/// MCP `tools/call` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Content segments.
    pub content: Vec<TextContent>,
    /// Present and true on failure only.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ResponseEnvelope {
    /// Returns the first text segment.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.first().map_or("", |segment| segment.text.as_str())
    }
}

/// Serialized body of an error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorDetail<'a> {
    /// Always true.
    pub error: bool,
    /// Classified message.
    pub message: String,
    /// Invoked tool name.
    pub tool: &'a str,
    /// ISO-8601 UTC timestamp with milliseconds.
    pub timestamp: String,
    /// Validation issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<&'a [ValidationIssue]>,
    /// Error chain lines; development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
    /// Sanitized arguments; only when echo is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

/// Failure classes.
enum Classified<'a> {
    /// Schema violations.
    Validation(&'a [ValidationIssue]),
    /// Failures with a meaningful message.
    Operational(&'a ToolError),
    /// Everything else.
    Unknown,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Renders invocation outcomes.
///
/// # Invariants
/// - Echoed arguments are always sanitized.
/// - Trace lines never appear in production mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeBuilder {
    /// Execution mode fixed at construction.
    mode: ExecutionMode,
    /// Include sanitized arguments in error details.
    echo_arguments: bool,
    /// Sanitize success payloads.
    redact_results: bool,
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::new(ExecutionMode::Production, false, true)
    }
}

impl EnvelopeBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new(mode: ExecutionMode, echo_arguments: bool, redact_results: bool) -> Self {
        Self { mode, echo_arguments, redact_results }
    }

    /// Creates a builder from diagnostics settings.
    #[must_use]
    pub const fn from_config(config: &DiagnosticsConfig) -> Self {
        Self::new(config.mode, config.echo_arguments, config.redact_results)
    }

    /// Wraps a successful result.
    #[must_use]
    pub fn success(&self, result: &Value) -> ResponseEnvelope {
        let rendered = if self.redact_results {
            pretty(&sanitize_value(result))
        } else {
            pretty(result)
        };
        ResponseEnvelope { content: vec![TextContent::new(rendered)], is_error: false }
    }

    /// Renders a failure.
    #[must_use]
    pub fn failure(
        &self,
        error: &ToolError,
        tool: &str,
        arguments: Option<&Value>,
    ) -> ResponseEnvelope {
        let sanitized = arguments.map(sanitize_value);
        let (message, issues, stack) = match classify(error) {
            Classified::Validation(issues) => ("Validation error".to_string(), Some(issues), None),
            Classified::Operational(error) => {
                let stack = (self.mode == ExecutionMode::Development).then(|| error_chain(error));
                (error.to_string(), None, stack)
            }
            Classified::Unknown => ("Unknown error".to_string(), None, None),
        };
        let detail = ErrorDetail {
            error: true,
            message,
            tool,
            timestamp: timestamp_now(),
            issues,
            stack,
            arguments: if self.echo_arguments { sanitized } else { None },
        };
        let text = serde_json::to_string_pretty(&detail)
            .unwrap_or_else(|_| FALLBACK_ERROR_TEXT.to_string());
        ResponseEnvelope { content: vec![TextContent::new(text)], is_error: true }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps an error to its class.
fn classify(error: &ToolError) -> Classified<'_> {
    match error {
        ToolError::Validation(failure) => Classified::Validation(failure.issues()),
        ToolError::Unknown => Classified::Unknown,
        _ => Classified::Operational(error),
    }
}

/// Lists the error and its causes, capped at [`MAX_STACK_LINES`].
fn error_chain(error: &ToolError) -> Vec<String> {
    let mut lines = vec![format!("Error: {error}")];
    let mut cause = error.source();
    while let Some(current) = cause {
        if lines.len() >= MAX_STACK_LINES {
            break;
        }
        lines.push(format!("caused by: {current}"));
        cause = current.source();
    }
    lines
}

/// Pretty-prints a JSON value.
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Formats the current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
fn timestamp_now() -> String {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    OffsetDateTime::now_utc().format(&format).unwrap_or_default()
}

/// Serde predicate for omitting `isError` on success.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "Serde skip predicates take references.")]
const fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// SECTION: Tests
// ============================================================================
