// crates/langflow-mcp-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: tracing subscriber installation for the CLI process.
// Purpose: Route diagnostics to stderr so stdout stays protocol-only.
// Dependencies: langflow-mcp-config, tracing-subscriber
// ============================================================================

//! ## Overview
//! Builds an [`EnvFilter`] from the configured [`LogLevel`], letting a
//! non-empty `RUST_LOG` take precedence, and installs a `fmt` layer writing to
//! stderr. The `silent` level installs nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use langflow_mcp_config::LogLevel;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding a filter that overrides the configured level.
pub const RUST_LOG_ENV: &str = "RUST_LOG";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Subscriber installation failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

// ============================================================================
// SECTION: Installation
// ============================================================================

/// Resolves the filter for `level`, preferring a parsable `override_filter`.
///
/// Returns `None` when logging is silenced.
#[must_use]
pub fn resolve_filter(level: LogLevel, override_filter: Option<&str>) -> Option<EnvFilter> {
    let directive = level.as_directive()?;
    let custom = override_filter
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok());
    Some(custom.unwrap_or_else(|| EnvFilter::new(directive)))
}

/// Installs the global stderr subscriber for `level`.
///
/// # Errors
///
/// Returns [`LoggingError::Install`] when a subscriber is already set.
pub fn init(level: LogLevel) -> Result<(), LoggingError> {
    let override_filter = std::env::var(RUST_LOG_ENV).ok();
    let Some(filter) = resolve_filter(level, override_filter.as_deref()) else {
        return Ok(());
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
