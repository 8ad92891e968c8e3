// crates/langflow-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: MCP server implementations for stdio and HTTP transports.
// Purpose: Expose Langflow tools via JSON-RPC 2.0.
// Dependencies: langflow-mcp-config, axum, tokio, tracing
// ============================================================================

//! ## Overview
//! The MCP server speaks JSON-RPC 2.0 over newline-delimited stdio or over
//! HTTP (`POST /rpc`, `GET /health`). Every `tools/call` is routed through
//! [`crate::tools::ToolRouter`], which always produces an envelope; protocol
//! errors are reserved for malformed requests and unknown methods.
//!
//! The stdio transport reads one bounded line at a time, handles each request
//! in its own task, and serializes responses through a single writer task so
//! a slow remote call never blocks the next request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use langflow_mcp_config::LangflowMcpConfig;
use langflow_mcp_config::ServerTransport;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::client::HttpLangflowClient;
use crate::registry::ToolDefinition;
use crate::tools::ToolRouter;
use crate::tools::ToolRouterConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Protocol revision reported when the client does not name one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

/// Server name reported by `initialize`.
pub const SERVER_NAME: &str = "langflow-mcp";

/// Pending responses buffered ahead of the stdio writer.
const OUTBOUND_QUEUE: usize = 64;

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Server configuration.
    config: LangflowMcpConfig,
    /// Tool router for request dispatch.
    router: ToolRouter,
}

impl McpServer {
    /// Builds a new MCP server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when validation or client setup fails.
    pub fn from_config(config: LangflowMcpConfig) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let client = HttpLangflowClient::new(&config.langflow)
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        let router = ToolRouter::new(Arc::new(client), ToolRouterConfig::from_config(&config));
        Ok(Self::with_router(config, router))
    }

    /// Builds a server around an existing router.
    #[must_use]
    pub const fn with_router(config: LangflowMcpConfig, router: ToolRouter) -> Self {
        Self { config, router }
    }

    /// Returns the tool router.
    #[must_use]
    pub const fn router(&self) -> &ToolRouter {
        &self.router
    }

    /// Serves requests using the configured transport until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the transport fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        let max_body_bytes = self.config.server.max_body_bytes;
        let tools = self.router.list_tools().len();
        match self.config.server.transport {
            ServerTransport::Stdio => {
                tracing::info!(transport = "stdio", tools, "langflow mcp server started");
                let reader = tokio::io::BufReader::new(tokio::io::stdin());
                let writer = tokio::io::stdout();
                serve_lines(&self.router, reader, writer, max_body_bytes, shutdown_signal()).await
            }
            ServerTransport::Http => {
                let addr = self
                    .config
                    .server
                    .bind_addr()
                    .map_err(|err| McpServerError::Config(err.to_string()))?;
                if !addr.ip().is_loopback() {
                    tracing::warn!(%addr, "http transport bound to a non-loopback address");
                }
                serve_http(addr, self.router, max_body_bytes).await
            }
        }
    }
}

/// Resolves when the process receives an interrupt.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("interrupt handler unavailable; running until input closes");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// One inbound stdio line.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    /// Complete message without its terminator.
    Message(Vec<u8>),
    /// Line longer than the limit; already discarded.
    Oversized,
    /// Input closed.
    Closed,
}

/// Serves newline-delimited JSON-RPC until input closes or `shutdown` fires.
///
/// In-flight requests finish before the writer drains and the call returns.
async fn serve_lines<R, W, S>(
    router: &ToolRouter,
    mut reader: R,
    writer: W,
    max_body_bytes: usize,
    shutdown: S,
) -> Result<(), McpServerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    S: Future<Output = ()>,
{
    let (tx, rx) = mpsc::channel::<Vec<u8>>(OUTBOUND_QUEUE);
    let writer_task = tokio::spawn(write_responses(writer, rx));
    tokio::pin!(shutdown);
    let outcome = loop {
        let frame = tokio::select! {
            frame = read_frame(&mut reader, max_body_bytes) => frame,
            () = &mut shutdown => break Ok(()),
        };
        match frame {
            Ok(Frame::Message(line)) => {
                let router = router.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some((_, response)) = parse_request(&router, &line).await {
                        send_response(&tx, &response).await;
                    }
                });
            }
            Ok(Frame::Oversized) => {
                tracing::warn!(max_body_bytes, "stdio request exceeds size limit");
                send_response(&tx, &payload_too_large().1).await;
            }
            Ok(Frame::Closed) => break Ok(()),
            Err(err) => break Err(err),
        }
    };
    drop(tx);
    let written = writer_task
        .await
        .map_err(|_| McpServerError::Transport("stdio writer task failed".to_string()))?;
    outcome.and(written)
}

/// Serializes `response` onto the writer queue.
async fn send_response(tx: &mpsc::Sender<Vec<u8>>, response: &JsonRpcResponse) {
    match serde_json::to_vec(response) {
        Ok(payload) => {
            let _ = tx.send(payload).await;
        }
        Err(err) => tracing::error!(error = %err, "json-rpc serialization failed"),
    }
}

/// Writes queued payloads, one line each, until every sender is dropped.
async fn write_responses<W>(
    mut writer: W,
    mut rx: mpsc::Receiver<Vec<u8>>,
) -> Result<(), McpServerError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(mut payload) = rx.recv().await {
        payload.push(b'\n');
        writer
            .write_all(&payload)
            .await
            .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
        writer
            .flush()
            .await
            .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    }
    writer
        .shutdown()
        .await
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))
}

/// Reads one line of at most `max_body_bytes`, skipping blank lines.
async fn read_frame<R>(reader: &mut R, max_body_bytes: usize) -> Result<Frame, McpServerError>
where
    R: AsyncBufRead + Unpin,
{
    let limit = u64::try_from(max_body_bytes).unwrap_or(u64::MAX).saturating_add(1);
    loop {
        let mut line = Vec::new();
        let read = (&mut *reader)
            .take(limit)
            .read_until(b'\n', &mut line)
            .await
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if read == 0 {
            return Ok(Frame::Closed);
        }
        let terminated = line.last() == Some(&b'\n');
        if terminated {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        if line.len() > max_body_bytes {
            if !terminated {
                discard_line(reader).await?;
            }
            return Ok(Frame::Oversized);
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            if terminated {
                continue;
            }
            return Ok(Frame::Closed);
        }
        return Ok(Frame::Message(line));
    }
}

/// Consumes input through the next newline without buffering it.
async fn discard_line<R>(reader: &mut R) -> Result<(), McpServerError>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (consumed, done) = {
            let available = reader
                .fill_buf()
                .await
                .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|byte| *byte == b'\n') {
                Some(position) => (position + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(consumed);
        if done {
            return Ok(());
        }
    }
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Shared server state for HTTP handlers.
#[derive(Clone)]
struct ServerState {
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

/// Serves JSON-RPC requests over HTTP until interrupted.
async fn serve_http(
    addr: SocketAddr,
    router: ToolRouter,
    max_body_bytes: usize,
) -> Result<(), McpServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| McpServerError::Transport("http bind failed".to_string()))?;
    let local = listener
        .local_addr()
        .map_err(|_| McpServerError::Transport("http bind failed".to_string()))?;
    tracing::info!(transport = "http", addr = %local, "langflow mcp server started");
    axum::serve(listener, http_app(router, max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|_| McpServerError::Transport("http server failed".to_string()))
}

/// Builds the HTTP application.
fn http_app(router: ToolRouter, max_body_bytes: usize) -> Router {
    let state = Arc::new(ServerState { router, max_body_bytes });
    Router::new()
        .route("/rpc", post(handle_http))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Handles HTTP JSON-RPC requests.
async fn handle_http(State(state): State<Arc<ServerState>>, bytes: Bytes) -> Response {
    if bytes.len() > state.max_body_bytes {
        let (status, response) = payload_too_large();
        return (status, axum::Json(response)).into_response();
    }
    match parse_request(&state.router, &bytes).await {
        Some((status, response)) => (status, axum::Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Liveness probe.
async fn handle_health() -> impl IntoResponse {
    axum::Json(json!({ "status": "ok" }))
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier; absent for notifications, `Some(Null)` for `"id": null`.
    #[serde(default, deserialize_with = "present_id")]
    id: Option<Value>,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    #[serde(default)]
    params: Option<Value>,
}

/// Keeps an explicit `null` identifier distinct from a missing one.
fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Option<Value>,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Parses a raw payload and dispatches it; `None` means no reply is due.
async fn parse_request(
    router: &ToolRouter,
    bytes: &[u8],
) -> Option<(StatusCode, JsonRpcResponse)> {
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return Some(jsonrpc_error(Value::Null, StatusCode::BAD_REQUEST, -32700, "parse error"));
    };
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handle_request(router, request).await,
        Err(_) => {
            Some(jsonrpc_error(id, StatusCode::BAD_REQUEST, -32600, "invalid json-rpc request"))
        }
    }
}

/// Dispatches a JSON-RPC request.
async fn handle_request(
    router: &ToolRouter,
    request: JsonRpcRequest,
) -> Option<(StatusCode, JsonRpcResponse)> {
    if request.method.starts_with("notifications/") {
        return None;
    }
    let Some(id) = request.id else {
        tracing::debug!(method = %request.method, "ignoring notification");
        return None;
    };
    if request.jsonrpc != "2.0" {
        return Some(jsonrpc_error(id, StatusCode::BAD_REQUEST, -32600, "invalid json-rpc version"));
    }
    let response = match request.method.as_str() {
        "initialize" => jsonrpc_result(id, initialize_result(request.params.as_ref())),
        "ping" => jsonrpc_result(id, json!({})),
        "tools/list" => match serde_json::to_value(ToolListResult { tools: router.list_tools() }) {
            Ok(value) => jsonrpc_result(id, value),
            Err(_) => jsonrpc_error(id, StatusCode::OK, -32603, "serialization failed"),
        },
        "tools/call" => {
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<ToolCallParams>(params) {
                Ok(call) => {
                    let envelope = router.invoke(&call.name, call.arguments).await;
                    match serde_json::to_value(envelope) {
                        Ok(value) => jsonrpc_result(id, value),
                        Err(_) => jsonrpc_error(id, StatusCode::OK, -32603, "serialization failed"),
                    }
                }
                Err(_) => jsonrpc_error(id, StatusCode::BAD_REQUEST, -32602, "invalid tool params"),
            }
        }
        _ => jsonrpc_error(id, StatusCode::BAD_REQUEST, -32601, "method not found"),
    };
    Some(response)
}

/// Builds the `initialize` result, echoing the client protocol version.
fn initialize_result(params: Option<&Value>) -> Value {
    let protocol = params
        .and_then(|params| params.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    json!({
        "protocolVersion": protocol,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
    })
}

/// Builds a successful JSON-RPC response.
const fn jsonrpc_result(id: Value, result: Value) -> (StatusCode, JsonRpcResponse) {
    (StatusCode::OK, JsonRpcResponse { jsonrpc: "2.0", id, result: Some(result), error: None })
}

/// Builds a JSON-RPC error response.
fn jsonrpc_error(
    id: Value,
    status: StatusCode,
    code: i64,
    message: &str,
) -> (StatusCode, JsonRpcResponse) {
    (
        status,
        JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError { code, message: message.to_string() }),
        },
    )
}

/// Error response for payloads over the size limit.
fn payload_too_large() -> (StatusCode, JsonRpcResponse) {
    jsonrpc_error(Value::Null, StatusCode::PAYLOAD_TOO_LARGE, -32070, "request body too large")
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, thiserror::Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
