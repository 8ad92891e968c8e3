// crates/langflow-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fake Langflow APIs and envelope helpers.
// Purpose: Provide reusable test infrastructure for deterministic testing.
// Dependencies: langflow-mcp
// ============================================================================

//! ## Overview
//! Fake [`LangflowApi`] implementations that record operations, return a
//! fixed body, or panic, plus helpers to parse rendered envelopes.

#![allow(
    dead_code,
    clippy::panic,
    clippy::expect_used,
    reason = "Shared test helpers may be unused in some cases and assert by panicking."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use langflow_mcp::ApiError;
use langflow_mcp::LangflowApi;
use langflow_mcp::Operation;
use langflow_mcp::ResponseEnvelope;
use langflow_mcp::ToolRouter;
use langflow_mcp::ToolRouterConfig;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Well-formed flow identifier.
pub const FLOW_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Second well-formed flow identifier.
pub const OTHER_FLOW_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

// ============================================================================
// SECTION: Fake APIs
// ============================================================================

/// Records every operation and answers with a fixed body.
pub struct RecordingApi {
    /// Operations received, in call order.
    calls: Mutex<Vec<Operation>>,
    /// Body returned for every call.
    body: Value,
}

impl RecordingApi {
    /// Creates a recorder answering with `body`.
    #[must_use]
    pub fn new(body: Value) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), body })
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl LangflowApi for RecordingApi {
    async fn execute(&self, operation: Operation) -> Result<Value, ApiError> {
        self.calls.lock().expect("calls lock").push(operation);
        Ok(self.body.clone())
    }
}

/// Panics on every call.
pub struct PanickingApi;

#[async_trait]
impl LangflowApi for PanickingApi {
    async fn execute(&self, _operation: Operation) -> Result<Value, ApiError> {
        panic!("remote call must not escape the router");
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a router with default settings over `api`.
#[must_use]
pub fn router(api: Arc<dyn LangflowApi>) -> ToolRouter {
    ToolRouter::new(api, ToolRouterConfig::default())
}

/// Parses the text of an envelope as JSON.
#[must_use]
pub fn envelope_json(envelope: &ResponseEnvelope) -> Value {
    assert_eq!(envelope.content.len(), 1, "envelope must carry exactly one segment");
    assert_eq!(envelope.content[0].kind, "text");
    serde_json::from_str(envelope.text()).expect("envelope text is json")
}

/// Returns the issue messages of a validation envelope.
#[must_use]
pub fn issue_messages(envelope: &ResponseEnvelope) -> Vec<String> {
    let detail = envelope_json(envelope);
    detail["issues"]
        .as_array()
        .map(|issues| {
            issues.iter().filter_map(|issue| issue["message"].as_str().map(str::to_string)).collect()
        })
        .unwrap_or_default()
}
