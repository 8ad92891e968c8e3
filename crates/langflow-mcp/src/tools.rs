// crates/langflow-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: Validation, dispatch, and envelope rendering for tool calls.
// Purpose: Turn every `tools/call` into exactly one response envelope.
// Dependencies: serde_json, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! [`ToolRouter::invoke`] is total: lookup, validation, argument reshaping,
//! and the remote call each fail into a [`ToolError`], and every outcome is
//! rendered by the [`EnvelopeBuilder`]. The remote call runs in its own task
//! so a panic inside the client surfaces as an unknown error instead of
//! tearing down the transport.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use langflow_mcp_config::LangflowMcpConfig;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::client::ApiError;
use crate::client::LangflowApi;
use crate::envelope::EnvelopeBuilder;
use crate::envelope::ResponseEnvelope;
use crate::file_guard::DEFAULT_MAX_FILE_BYTES;
use crate::file_guard::FileGuardError;
use crate::file_guard::FileSizeGuard;
use crate::registry::ToolDefinition;
use crate::registry::ToolRegistry;
use crate::registry::ToolSpec;
use crate::schema::ArgumentError;
use crate::schema::ValidationFailure;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tool invocation failures.
///
/// # Invariants
/// - Variants are stable for envelope classification.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments violated the tool schema.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// Tool name is not registered or is hidden.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    /// Upload rejected by the size guard.
    #[error(transparent)]
    FileSize(#[from] FileGuardError),
    /// Remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Validated arguments could not be reshaped.
    #[error(transparent)]
    InvalidParams(#[from] ArgumentError),
    /// Result could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Unclassifiable failure, including panics in the remote task.
    #[error("Unknown error")]
    Unknown,
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Router construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolRouterConfig {
    /// Envelope rendering settings.
    pub envelopes: EnvelopeBuilder,
    /// Decoded upload ceiling in bytes.
    pub max_file_bytes: usize,
    /// List and dispatch deprecated tools.
    pub include_deprecated: bool,
}

impl Default for ToolRouterConfig {
    fn default() -> Self {
        Self {
            envelopes: EnvelopeBuilder::default(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            include_deprecated: true,
        }
    }
}

impl ToolRouterConfig {
    /// Derives router settings from the server configuration.
    #[must_use]
    pub const fn from_config(config: &LangflowMcpConfig) -> Self {
        Self {
            envelopes: EnvelopeBuilder::from_config(&config.diagnostics),
            max_file_bytes: config.limits.max_file_bytes,
            include_deprecated: config.catalog.include_deprecated,
        }
    }
}

/// Dispatches tool calls to the Langflow API.
///
/// # Invariants
/// - The registry is immutable after construction.
/// - Raw arguments are never logged.
#[derive(Clone)]
pub struct ToolRouter {
    /// Tool catalog.
    registry: Arc<ToolRegistry>,
    /// Remote API.
    api: Arc<dyn LangflowApi>,
    /// Envelope renderer.
    envelopes: EnvelopeBuilder,
    /// Upload guard.
    guard: FileSizeGuard,
    /// Deprecated tool visibility.
    include_deprecated: bool,
}

impl ToolRouter {
    /// Builds a router over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn LangflowApi>, config: ToolRouterConfig) -> Self {
        Self {
            registry: Arc::new(ToolRegistry::new(config.max_file_bytes)),
            api,
            envelopes: config.envelopes,
            guard: FileSizeGuard::new(config.max_file_bytes),
            include_deprecated: config.include_deprecated,
        }
    }

    /// Returns the visible tool catalog.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.registry.catalog(self.include_deprecated)
    }

    /// Invokes `name`; `None` or `null` arguments are treated as `{}`.
    pub async fn invoke(&self, name: &str, arguments: Option<Value>) -> ResponseEnvelope {
        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };
        match self.dispatch(name, &arguments).await {
            Ok(result) => {
                tracing::debug!(tool = name, "tool call succeeded");
                self.envelopes.success(&result)
            }
            Err(error) => {
                tracing::warn!(tool = name, error = %error, "tool call failed");
                self.envelopes.failure(&error, name, Some(&arguments))
            }
        }
    }

    /// Resolves a visible tool.
    fn lookup(&self, name: &str) -> Result<&ToolSpec, ToolError> {
        self.registry
            .get(name)
            .filter(|spec| self.include_deprecated || !spec.deprecated)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Runs the pipeline up to the remote result.
    async fn dispatch(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        let spec = self.lookup(name)?;
        let validated = spec.schema.validate(arguments)?;
        let operation = (spec.handler)(validated, &self.guard)?;
        let api = Arc::clone(&self.api);
        let result = tokio::spawn(async move { api.execute(operation).await })
            .await
            .map_err(|_| ToolError::Unknown)??;
        Ok(match spec.ack {
            Some(message) => json!({ "success": true, "message": message }),
            None => result,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
