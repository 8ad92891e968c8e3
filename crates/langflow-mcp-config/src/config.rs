// crates/langflow-mcp-config/src/config.rs
// ============================================================================
// Module: Langflow MCP Configuration
// Description: Configuration loading, env overrides, and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is resolved in layers: an optional TOML file (explicit path,
//! `LANGFLOW_MCP_CONFIG`, or `langflow-mcp.toml` in the working directory),
//! then environment overrides, then [`LangflowMcpConfig::validate`].
//! Environment lookups go through an injectable function so callers and tests
//! never need to mutate the process environment.
//!
//! ## Invariants
//! - A validated config always carries a base URL and an API key.
//! - The base URL is an absolute `http` or `https` URL that can carry a path.
//! - Size and timeout limits stay inside fixed bounds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "langflow-mcp.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "LANGFLOW_MCP_CONFIG";
/// Environment variable carrying the Langflow base URL.
pub const BASE_URL_ENV_VAR: &str = "LANGFLOW_BASE_URL";
/// Environment variable carrying the Langflow API key.
pub const API_KEY_ENV_VAR: &str = "LANGFLOW_API_KEY";
/// Environment variable carrying the request timeout in milliseconds.
pub const TIMEOUT_ENV_VAR: &str = "LANGFLOW_TIMEOUT";
/// Environment variable selecting the MCP transport.
pub const TRANSPORT_ENV_VAR: &str = "MCP_MODE";
/// Environment variable carrying the HTTP port.
pub const PORT_ENV_VAR: &str = "PORT";
/// Environment variable selecting the diagnostics mode.
pub const MODE_ENV_VAR: &str = "LANGFLOW_MCP_ENV";
/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
/// Environment variable toggling deprecated tools in the catalog.
pub const INCLUDE_DEPRECATED_ENV_VAR: &str = "LANGFLOW_MCP_INCLUDE_DEPRECATED";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Minimum request timeout in milliseconds.
const MIN_TIMEOUT_MS: u64 = 1_000;
/// Maximum request timeout in milliseconds.
const MAX_TIMEOUT_MS: u64 = 600_000;
/// Default connect timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Minimum connect timeout in milliseconds.
const MIN_CONNECT_TIMEOUT_MS: u64 = 100;
/// Default maximum Langflow response body size in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;
/// Minimum Langflow response body size in bytes.
const MIN_MAX_RESPONSE_BYTES: usize = 1024;
/// Maximum Langflow response body size in bytes.
const MAX_MAX_RESPONSE_BYTES: usize = 512 * 1024 * 1024;
/// Default maximum decoded upload size in bytes.
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;
/// Upper bound for the configurable upload size.
const MAX_MAX_FILE_BYTES: usize = 100 * 1024 * 1024;
/// Default maximum inbound request size in bytes.
///
/// Sized so a base64 upload at the default file ceiling still fits.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
/// Minimum inbound request size in bytes.
const MIN_MAX_BODY_BYTES: usize = 1024;
/// Default bind address for the HTTP transport.
pub const DEFAULT_HTTP_BIND: &str = "127.0.0.1:3000";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Langflow MCP configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LangflowMcpConfig {
    /// Remote Langflow API connection settings.
    #[serde(default)]
    pub langflow: LangflowApiConfig,
    /// MCP transport settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Error diagnostics and result shaping.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Tool catalog exposure.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Payload limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LangflowMcpConfig {
    /// Loads configuration using the process environment for overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, when an
    /// override is malformed, or when validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| env::var(key).ok())
    }

    /// Loads configuration with a caller-supplied environment lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading, overriding, or validation fails.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match resolve_path(path, &lookup)? {
            Some(resolved) => Self::read_file(&resolved)?,
            None => Self::default(),
        };
        config.apply_env_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text without applying overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads and parses a config file with size limits.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Applies environment variable overrides on top of file values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable holds an unparsable value.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = non_empty(lookup(BASE_URL_ENV_VAR)) {
            self.langflow.base_url = Some(value);
        }
        if let Some(value) = non_empty(lookup(API_KEY_ENV_VAR)) {
            self.langflow.api_key = Some(ApiKey::new(value));
        }
        if let Some(value) = non_empty(lookup(TIMEOUT_ENV_VAR)) {
            self.langflow.timeout_ms = value.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{TIMEOUT_ENV_VAR} must be an integer"))
            })?;
        }
        if let Some(value) = non_empty(lookup(TRANSPORT_ENV_VAR)) {
            self.server.transport = value.parse()?;
        }
        if let Some(value) = non_empty(lookup(PORT_ENV_VAR)) {
            let port: u16 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{PORT_ENV_VAR} must be a port")))?;
            self.server.bind = Some(format!("127.0.0.1:{port}"));
        }
        if let Some(value) = non_empty(lookup(MODE_ENV_VAR)) {
            self.diagnostics.mode = value.parse()?;
        }
        if let Some(value) = non_empty(lookup(LOG_LEVEL_ENV_VAR)) {
            self.logging.level = value.parse()?;
        }
        if let Some(value) = non_empty(lookup(INCLUDE_DEPRECATED_ENV_VAR)) {
            self.catalog.include_deprecated = parse_flag(INCLUDE_DEPRECATED_ENV_VAR, &value)?;
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.langflow.validate()?;
        self.server.validate()?;
        self.limits.validate()?;
        if self.server.max_body_bytes < self.limits.max_file_bytes {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be at least limits.max_file_bytes".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Langflow API
// ============================================================================

/// API key wrapper that never prints its value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw key for use in outbound headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***REDACTED***)")
    }
}

/// Remote Langflow API connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LangflowApiConfig {
    /// Base URL of the Langflow deployment, without `/api/v1`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key sent as `x-api-key`.
    #[serde(default)]
    pub api_key: Option<ApiKey>,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection establishment timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Hard ceiling on one response body in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for LangflowApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl LangflowApiConfig {
    /// Returns the parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is missing or unusable.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{BASE_URL_ENV_VAR} or langflow.base_url must be set"
            )));
        }
        let url = Url::parse(raw)
            .map_err(|err| ConfigError::Invalid(format!("invalid langflow.base_url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "langflow.base_url must use http or https".to_string(),
            ));
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::Invalid("langflow.base_url cannot carry a path".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "langflow.base_url must not include a query or fragment".to_string(),
            ));
        }
        Ok(url)
    }

    /// Validates connection settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        let has_key = self.api_key.as_ref().is_some_and(|key| !key.expose().trim().is_empty());
        if !has_key {
            return Err(ConfigError::Invalid(format!(
                "{API_KEY_ENV_VAR} or langflow.api_key must be set"
            )));
        }
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "langflow.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.connect_timeout_ms < MIN_CONNECT_TIMEOUT_MS
            || self.connect_timeout_ms > self.timeout_ms
        {
            return Err(ConfigError::Invalid(format!(
                "langflow.connect_timeout_ms must be between {MIN_CONNECT_TIMEOUT_MS} and \
                 timeout_ms"
            )));
        }
        if !(MIN_MAX_RESPONSE_BYTES..=MAX_MAX_RESPONSE_BYTES).contains(&self.max_response_bytes) {
            return Err(ConfigError::Invalid(format!(
                "langflow.max_response_bytes must be between {MIN_MAX_RESPONSE_BYTES} and \
                 {MAX_MAX_RESPONSE_BYTES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Supported MCP transport types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

impl FromStr for ServerTransport {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => Err(ConfigError::Invalid(format!("unsupported transport: {other}"))),
        }
    }
}

/// Server configuration for MCP transports.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Transport type for MCP.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    #[serde(default)]
    pub bind: Option<String>,
    /// Permits binding the HTTP transport to a non-loopback address.
    #[serde(default)]
    pub allow_non_loopback: bool,
    /// Maximum request size in bytes (one stdio line or one HTTP body).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: None,
            allow_non_loopback: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Returns the HTTP bind address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let bind = self.bind.as_deref().map_or(DEFAULT_HTTP_BIND, str::trim);
        bind.parse().map_err(|_| ConfigError::Invalid(format!("invalid bind address: {bind}")))
    }

    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes < MIN_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "max_body_bytes must be at least {MIN_MAX_BODY_BYTES}"
            )));
        }
        if self.transport == ServerTransport::Http {
            let addr = self.bind_addr()?;
            if !addr.ip().is_loopback() && !self.allow_non_loopback {
                return Err(ConfigError::Invalid(
                    "non-loopback bind requires server.allow_non_loopback".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Execution mode controlling error detail exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Error envelopes carry no trace information.
    #[default]
    Production,
    /// Error envelopes carry a short trace of the error source chain.
    Development,
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::Invalid(format!("unsupported execution mode: {other}"))),
        }
    }
}

/// Diagnostics and result shaping.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Execution mode.
    #[serde(default)]
    pub mode: ExecutionMode,
    /// Echo sanitized arguments inside error envelopes.
    #[serde(default)]
    pub echo_arguments: bool,
    /// Redact sensitive keys from successful results.
    #[serde(default = "default_true")]
    pub redact_results: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { mode: ExecutionMode::Production, echo_arguments: false, redact_results: true }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Tool catalog exposure.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Expose deprecated tools in listings and dispatch.
    #[serde(default = "default_true")]
    pub include_deprecated: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { include_deprecated: true }
    }
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Payload limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum decoded upload size in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_file_bytes: DEFAULT_MAX_FILE_BYTES }
    }
}

impl LimitsConfig {
    /// Validates payload limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_MAX_FILE_BYTES {
            return Err(ConfigError::Invalid(format!(
                "limits.max_file_bytes must be between 1 and {MAX_MAX_FILE_BYTES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Logging
// ============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Debug and above.
    Debug,
    /// Info and above.
    #[default]
    Info,
    /// Warnings and errors.
    Warn,
    /// Errors only.
    Error,
    /// No log output.
    Silent,
}

impl LogLevel {
    /// Returns the tracing filter directive, or `None` when silent.
    #[must_use]
    pub const fn as_directive(self) -> Option<&'static str> {
        match self {
            Self::Debug => Some("debug"),
            Self::Info => Some("info"),
            Self::Warn => Some("warn"),
            Self::Error => Some("error"),
            Self::Silent => None,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "silent" => Ok(Self::Silent),
            other => Err(ConfigError::Invalid(format!("unsupported log level: {other}"))),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level emitted.
    #[serde(default)]
    pub level: LogLevel,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller, the environment, or the default.
///
/// The default file is optional; explicit paths must exist.
fn resolve_path<F>(path: Option<&Path>, lookup: &F) -> Result<Option<PathBuf>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = match path {
        Some(path) => Some(path.to_path_buf()),
        None => non_empty(lookup(CONFIG_ENV_VAR)).map(PathBuf::from),
    };
    if let Some(explicit) = explicit {
        if explicit.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(explicit));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default.is_file().then_some(default))
}

/// Drops unset or blank values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Parses a boolean flag from an environment value.
fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(format!("{name} must be a boolean"))),
    }
}

/// Default boolean value of `true`.
const fn default_true() -> bool {
    true
}

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default connect timeout.
const fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

/// Default response body ceiling.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default maximum request size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default maximum upload size.
const fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}
