// crates/langflow-mcp/src/lib.rs
// ============================================================================
// Module: Langflow MCP
// Description: MCP server exposing the Langflow REST API as tools.
// Purpose: Validate, dispatch, and render Langflow tool calls over JSON-RPC.
// Dependencies: langflow-mcp-config, axum, reqwest, tokio
// ============================================================================

//! ## Overview
//! Langflow MCP turns each Langflow REST endpoint into a named tool. A call
//! flows through the [`registry::ToolRegistry`] schema, the
//! [`file_guard::FileSizeGuard`] for uploads, and the [`client::LangflowApi`]
//! for the remote request; every outcome is rendered by the
//! [`envelope::EnvelopeBuilder`] with sensitive values redacted by
//! [`sanitize`]. Security posture: tool arguments and remote bodies are
//! untrusted; secrets never reach logs or error details.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod envelope;
pub mod file_guard;
pub mod graph;
pub mod operation;
pub mod registry;
pub mod sanitize;
pub mod schema;
pub mod server;
pub mod tools;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiError;
pub use client::HttpLangflowClient;
pub use client::LangflowApi;
pub use envelope::EnvelopeBuilder;
pub use envelope::ResponseEnvelope;
pub use file_guard::FileGuardError;
pub use file_guard::FileSizeGuard;
pub use graph::GraphValue;
pub use operation::Operation;
pub use registry::ToolDefinition;
pub use registry::ToolRegistry;
pub use sanitize::sanitize_graph;
pub use sanitize::sanitize_value;
pub use schema::ValidationFailure;
pub use schema::ValidationIssue;
pub use server::McpServer;
pub use server::McpServerError;
pub use tools::ToolError;
pub use tools::ToolRouter;
pub use tools::ToolRouterConfig;
