// crates/langflow-mcp/src/sanitize.rs
// ============================================================================
// Module: Sensitive-Data Sanitizer
// Description: Deep copy of a value graph with sensitive keys redacted.
// Purpose: Keep credentials out of anything echoed to callers or logs.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`sanitize_graph`] walks an arbitrary [`GraphValue`] and builds a new
//! [`Value`] tree. Keys in [`SENSITIVE_KEYS`] (case-insensitive) have their
//! value replaced with [`REDACTED`] whatever its type. Traversal is bounded:
//! objects deeper than [`MAX_DEPTH`] become a depth marker, and a container
//! entered twice becomes a cycle marker.
//!
//! ## Invariants
//! - The input is never mutated.
//! - Identity is pointer identity; structurally equal nodes are distinct.
//! - The visited set spans the whole traversal, so a node shared by two
//!   branches is reported as circular on its second appearance.
//! - Only objects count toward the depth budget. Array elements are copied
//!   at the depth of the array itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use serde_json::Map;
use serde_json::Value;

use crate::graph::GraphValue;
use crate::graph::NodeId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Deepest object level that is copied; root is level 0.
pub const MAX_DEPTH: usize = 10;

/// Replacement for sensitive values.
pub const REDACTED: &str = "***REDACTED***";

/// Marker key used for truncation and cycle placeholders.
pub const MARKER_KEY: &str = "__error";

/// Marker text for containers beyond [`MAX_DEPTH`].
pub const DEPTH_EXCEEDED: &str = "max depth exceeded";

/// Marker text for containers already visited.
pub const CIRCULAR_REFERENCE: &str = "circular reference";

/// Lower-case key names whose values are always redacted.
pub const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "new_password",
    "api_key",
    "token",
    "access_token",
    "refresh_token",
    "authorization",
    "x-api-key",
    "x-store-api-key",
    "set-cookie",
    "bearer",
    "session",
    "session_id",
    "cookie",
    "private_key",
    "secret",
    "credentials",
    "api-key",
];

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Returns true when `key` names a sensitive field.
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_lowercase();
    SENSITIVE_KEYS.contains(&lowered.as_str())
}

/// Sanitizes a plain JSON tree.
#[must_use]
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => sanitize_graph(&GraphValue::from(value)),
        scalar => scalar.clone(),
    }
}

/// Sanitizes a possibly cyclic value graph.
#[must_use]
pub fn sanitize_graph(value: &GraphValue) -> Value {
    SanitizationState::default().visit(value)
}

// ============================================================================
// SECTION: Traversal
// ============================================================================

/// Per-traversal bookkeeping.
#[derive(Debug, Default)]
struct SanitizationState {
    /// Object nesting level of the value currently being copied.
    depth: usize,
    /// Containers already entered.
    visited: HashSet<NodeId>,
}

impl SanitizationState {
    /// Copies one value.
    fn visit(&mut self, value: &GraphValue) -> Value {
        match value {
            GraphValue::Null => Value::Null,
            GraphValue::Bool(flag) => Value::Bool(*flag),
            GraphValue::Number(number) => Value::Number(number.clone()),
            GraphValue::String(text) => Value::String(text.clone()),
            GraphValue::Array(array) => {
                if !self.visited.insert(array.id()) {
                    return marker(CIRCULAR_REFERENCE);
                }
                Value::Array(array.items().iter().map(|item| self.visit(item)).collect())
            }
            GraphValue::Object(object) => self.enter(object.id(), |state| {
                let mut copy = Map::new();
                for (key, item) in object.entries() {
                    let sanitized = if is_sensitive_key(&key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        state.visit(&item)
                    };
                    copy.insert(key, sanitized);
                }
                Value::Object(copy)
            }),
        }
    }

    /// Applies the depth and cycle checks before copying an object.
    fn enter(&mut self, id: NodeId, copy: impl FnOnce(&mut Self) -> Value) -> Value {
        if self.depth > MAX_DEPTH {
            return marker(DEPTH_EXCEEDED);
        }
        if !self.visited.insert(id) {
            return marker(CIRCULAR_REFERENCE);
        }
        self.depth += 1;
        let copied = copy(self);
        self.depth -= 1;
        copied
    }
}

/// Builds a placeholder object.
fn marker(reason: &str) -> Value {
    let mut map = Map::new();
    map.insert(MARKER_KEY.to_string(), Value::String(reason.to_string()));
    Value::Object(map)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
