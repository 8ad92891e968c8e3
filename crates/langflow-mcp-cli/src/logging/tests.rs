// crates/langflow-mcp-cli/src/logging/tests.rs
// ============================================================================
// Module: CLI Logging Tests
// Description: Filter resolution for the stderr subscriber.
// Purpose: Pin level seeding, RUST_LOG precedence, and silence.
// Dependencies: langflow-mcp-config, tracing-subscriber
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions."
)]

use tracing::level_filters::LevelFilter;

use super::*;

#[test]
fn configured_level_seeds_filter() {
    let filter = resolve_filter(LogLevel::Warn, None).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
}

#[test]
fn rust_log_overrides_configured_level() {
    let filter = resolve_filter(LogLevel::Error, Some("debug")).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn blank_or_invalid_override_falls_back() {
    let blank = resolve_filter(LogLevel::Info, Some("  ")).unwrap();
    assert_eq!(blank.max_level_hint(), Some(LevelFilter::INFO));
    let invalid = resolve_filter(LogLevel::Info, Some("langflow=loud")).unwrap();
    assert_eq!(invalid.max_level_hint(), Some(LevelFilter::INFO));
}

#[test]
fn silent_installs_nothing() {
    assert!(resolve_filter(LogLevel::Silent, Some("debug")).is_none());
    assert!(init(LogLevel::Silent).is_ok());
}
