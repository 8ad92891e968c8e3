// crates/langflow-mcp-config/src/lib.rs
// ============================================================================
// Module: Langflow MCP Config Library
// Description: Canonical config model, environment overrides, and validation.
// Purpose: Single source of truth for langflow-mcp.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `langflow-mcp-config` defines the configuration model for the Langflow MCP
//! server. Settings come from an optional TOML file, then from environment
//! variables, and are validated fail-closed before the server starts.
//!
//! Security posture: the API key is held in a redacting wrapper and never
//! appears in `Debug` output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
