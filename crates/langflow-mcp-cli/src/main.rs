// crates/langflow-mcp-cli/src/main.rs
// ============================================================================
// Module: Langflow MCP CLI Entry Point
// Description: Command dispatcher for the Langflow MCP server.
// Purpose: Run the server, inspect the tool catalog, and probe health.
// Dependencies: clap, langflow-mcp, langflow-mcp-config, reqwest, tokio
// ============================================================================

//! ## Overview
//! The `langflow-mcp` binary loads configuration, installs logging on stderr,
//! and runs the MCP server over stdio or HTTP. Auxiliary commands print the
//! tool catalog, validate configuration, and probe a running HTTP server.
//! Every failure is reported on stderr with a non-zero exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod logging;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use langflow_mcp::McpServer;
use langflow_mcp::ToolRegistry;
use langflow_mcp::file_guard::DEFAULT_MAX_FILE_BYTES;
use langflow_mcp_config::LangflowMcpConfig;
use langflow_mcp_config::ServerTransport;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Upper bound on a health probe round trip.
const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "langflow-mcp", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Langflow MCP server.
    Serve(ServeCommand),
    /// Print the tool catalog as JSON.
    Tools(ToolsCommand),
    /// Check that a configured server is reachable.
    Healthcheck(HealthcheckCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to langflow-mcp.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Transport override.
    #[arg(long, value_enum, value_name = "TRANSPORT")]
    transport: Option<TransportArg>,
    /// HTTP bind address override.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
    /// Allow binding the HTTP transport to a non-loopback address.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_non_loopback: bool,
}

/// Arguments for the `tools` command.
#[derive(Args, Debug)]
struct ToolsCommand {
    /// Omit deprecated tools from the listing.
    #[arg(long, action = ArgAction::SetTrue)]
    hide_deprecated: bool,
}

/// Arguments for the `healthcheck` command.
#[derive(Args, Debug)]
struct HealthcheckCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate configuration and exit.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Transport selection on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TransportArg {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing failures.
#[derive(Debug)]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        write_stdout_line(&format!("langflow-mcp {}", env!("CARGO_PKG_VERSION")))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };
    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools(command) => command_tools(&command),
        Commands::Healthcheck(command) => command_healthcheck(&command).await,
        Commands::Config { command } => command_config(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| output_error("stdout", &err))?;
    write_stdout_line("")
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Loads configuration and runs the server until shutdown.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config.as_deref())?;
    apply_serve_overrides(&mut config, &command);
    logging::init(config.logging.level).map_err(|err| CliError::new(err.to_string()))?;
    tracing::debug!(max_body_bytes = config.server.max_body_bytes, "configuration loaded");
    let server = McpServer::from_config(config)
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Applies command-line overrides on top of loaded configuration.
fn apply_serve_overrides(config: &mut LangflowMcpConfig, command: &ServeCommand) {
    if let Some(transport) = command.transport {
        config.server.transport = transport.into();
    }
    if let Some(bind) = &command.bind {
        config.server.bind = Some(bind.clone());
    }
    if command.allow_non_loopback {
        config.server.allow_non_loopback = true;
    }
}

/// Prints the tool catalog.
fn command_tools(command: &ToolsCommand) -> CliResult<ExitCode> {
    let catalog = ToolRegistry::new(DEFAULT_MAX_FILE_BYTES).catalog(!command.hide_deprecated);
    let rendered = serde_json::to_string_pretty(&catalog)
        .map_err(|err| CliError::new(format!("failed to render tool catalog: {err}")))?;
    write_stdout_line(&rendered)?;
    Ok(ExitCode::SUCCESS)
}

/// Probes the configured transport.
async fn command_healthcheck(command: &HealthcheckCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    match config.server.transport {
        ServerTransport::Stdio => write_stdout_line("healthy (stdio transport)")?,
        ServerTransport::Http => {
            let addr = config.server.bind_addr().map_err(|err| CliError::new(err.to_string()))?;
            let url = health_url(addr);
            probe_health(&url, HEALTHCHECK_TIMEOUT).await?;
            write_stdout_line(&format!("healthy ({url})"))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            load_config(command.config.as_deref())?;
            write_stdout_line("config ok")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<LangflowMcpConfig> {
    LangflowMcpConfig::load(path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Returns the health endpoint for a bind address, mapping wildcard binds to
/// loopback.
fn health_url(addr: SocketAddr) -> String {
    let host = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}/health", SocketAddr::new(host, addr.port()))
}

/// Requests `url` and requires a `{"status": "ok"}` reply within `timeout`.
async fn probe_health(url: &str, timeout: Duration) -> CliResult<()> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| CliError::new(format!("health check client failed: {err}")))?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| CliError::new(format!("health check failed: {err}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::new(format!("health check failed: HTTP {}", status.as_u16())));
    }
    let body: Value = response
        .json()
        .await
        .map_err(|err| CliError::new(format!("health check failed: {err}")))?;
    if body.get("status").and_then(Value::as_str) != Some("ok") {
        return Err(CliError::new("health check failed: unexpected status body"));
    }
    Ok(())
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| output_error("stdout", &err))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write to {stream}: {error}"))
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
