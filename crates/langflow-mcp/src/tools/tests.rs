// crates/langflow-mcp/src/tools/tests.rs
// ============================================================================
// Module: Tool Router Unit Tests
// Description: Dispatch ordering, acknowledgements, and failure capture.
// Purpose: Validate the router pipeline against a recording API.
// Dependencies: langflow-mcp
// ============================================================================

//! ## Overview
//! Drives [`ToolRouter::invoke`] with a recording API and checks which calls
//! reach the remote side and how each outcome is rendered.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::*;
use crate::operation::Operation;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

enum Reply {
    Value(Value),
    NotFound,
    Panic,
}

struct RecordingApi {
    calls: Mutex<Vec<Operation>>,
    reply: Reply,
}

impl RecordingApi {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), reply })
    }

    fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LangflowApi for RecordingApi {
    async fn execute(&self, operation: Operation) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(operation);
        match &self.reply {
            Reply::Value(value) => Ok(value.clone()),
            Reply::NotFound => {
                Err(ApiError::status("Failed to get flow", 404, br#"{"detail":"Flow not found"}"#))
            }
            Reply::Panic => panic!("remote exploded"),
        }
    }
}

fn router_with(api: &Arc<RecordingApi>, config: ToolRouterConfig) -> ToolRouter {
    let api: Arc<dyn LangflowApi> = Arc::clone(api) as Arc<dyn LangflowApi>;
    ToolRouter::new(api, config)
}

fn router(api: &Arc<RecordingApi>) -> ToolRouter {
    router_with(api, ToolRouterConfig::default())
}

fn parsed(envelope: &ResponseEnvelope) -> Value {
    serde_json::from_str(envelope.text()).unwrap()
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

#[tokio::test]
async fn missing_arguments_are_treated_as_empty_object() {
    let api = RecordingApi::new(Reply::Value(json!([])));
    let envelope = router(&api).invoke("list_flows", None).await;
    assert!(!envelope.is_error);
    let null_args = router(&api).invoke("list_flows", Some(Value::Null)).await;
    assert!(!null_args.is_error);
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn success_returns_remote_body() {
    let api = RecordingApi::new(Reply::Value(json!({"id": ID, "name": "Flow"})));
    let envelope = router(&api).invoke("get_flow", Some(json!({"flow_id": ID}))).await;
    assert_eq!(parsed(&envelope), json!({"id": ID, "name": "Flow"}));
    assert_eq!(api.calls(), vec![Operation::GetFlow { flow_id: ID.to_string() }]);
}

#[tokio::test]
async fn acknowledged_tools_replace_remote_body() {
    let api = RecordingApi::new(Reply::Value(Value::Null));
    let envelope = router(&api).invoke("delete_flow", Some(json!({"flow_id": ID}))).await;
    assert!(!envelope.is_error);
    assert_eq!(parsed(&envelope), json!({"success": true, "message": "Flow deleted successfully"}));
}

#[tokio::test]
async fn unknown_tool_never_reaches_remote() {
    let api = RecordingApi::new(Reply::Value(Value::Null));
    let envelope = router(&api).invoke("drop_database", Some(json!({}))).await;
    assert!(envelope.is_error);
    assert_eq!(parsed(&envelope)["message"], json!("Unknown tool: drop_database"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn validation_failure_never_reaches_remote() {
    let api = RecordingApi::new(Reply::Value(Value::Null));
    let envelope = router(&api).invoke("get_flow", Some(json!({"flow_id": "nope"}))).await;
    let detail = parsed(&envelope);
    assert_eq!(detail["message"], json!("Validation error"));
    assert_eq!(detail["issues"][0]["path"], json!("flow_id"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn remote_status_is_operational() {
    let api = RecordingApi::new(Reply::NotFound);
    let envelope = router(&api).invoke("get_flow", Some(json!({"flow_id": ID}))).await;
    assert_eq!(
        parsed(&envelope)["message"],
        json!("Failed to get flow: HTTP 404 - {\"detail\":\"Flow not found\"}")
    );
}

#[tokio::test]
async fn remote_panic_becomes_unknown_error() {
    let api = RecordingApi::new(Reply::Panic);
    let envelope = router(&api).invoke("get_version", None).await;
    assert!(envelope.is_error);
    assert_eq!(parsed(&envelope)["message"], json!("Unknown error"));
}

// ============================================================================
// SECTION: Catalog Visibility
// ============================================================================

#[tokio::test]
async fn hidden_deprecated_tools_are_unknown() {
    let api = RecordingApi::new(Reply::Value(Value::Null));
    let config = ToolRouterConfig { include_deprecated: false, ..ToolRouterConfig::default() };
    let router = router_with(&api, config);
    assert!(router.list_tools().iter().all(|tool| tool.name != "process_flow"));
    let envelope = router.invoke("process_flow", Some(json!({"flow_id": ID}))).await;
    assert_eq!(parsed(&envelope)["message"], json!("Unknown tool: process_flow"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn deprecated_tools_dispatch_by_default() {
    let api = RecordingApi::new(Reply::Value(json!({"result": 1})));
    let router = router(&api);
    let listed = router.list_tools();
    let process = listed.iter().find(|tool| tool.name == "process_flow").unwrap();
    assert!(process.description.starts_with("[DEPRECATED] "));
    let envelope = router.invoke("process_flow", Some(json!({"flow_id": ID}))).await;
    assert!(!envelope.is_error);
}

// ============================================================================
// SECTION: Uploads
// ============================================================================

#[tokio::test]
async fn oversized_upload_is_rejected_before_remote() {
    let api = RecordingApi::new(Reply::Value(Value::Null));
    let config = ToolRouterConfig { max_file_bytes: 4, ..ToolRouterConfig::default() };
    let arguments = json!({
        "flow_id": ID,
        "file_name": "data.bin",
        "file_content": STANDARD.encode([0_u8; 64]),
    });
    let envelope = router_with(&api, config).invoke("upload_file", Some(arguments)).await;
    assert!(envelope.is_error);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn upload_within_limit_carries_decoded_bytes() {
    let api = RecordingApi::new(Reply::Value(json!({"path": "f/data.bin"})));
    let arguments = json!({
        "flow_id": ID,
        "file_name": "data.bin",
        "file_content": STANDARD.encode(b"hello"),
    });
    let envelope = router(&api).invoke("upload_file", Some(arguments)).await;
    assert!(!envelope.is_error);
    let calls = api.calls();
    let Some(Operation::UploadFile { flow_id, upload }) = calls.first() else {
        panic!("expected upload operation");
    };
    assert_eq!(flow_id, ID);
    assert_eq!(upload.file_name, "data.bin");
    assert_eq!(upload.bytes, b"hello");
}

#[tokio::test]
async fn echoed_arguments_never_leak_secrets() {
    let api = RecordingApi::new(Reply::NotFound);
    let config = ToolRouterConfig {
        envelopes: EnvelopeBuilder::new(
            langflow_mcp_config::ExecutionMode::Production,
            true,
            true,
        ),
        ..ToolRouterConfig::default()
    };
    let arguments = json!({"username": "ada", "password": "hunter2"});
    let envelope = router_with(&api, config).invoke("login", Some(arguments)).await;
    assert!(envelope.is_error);
    assert!(!envelope.text().contains("hunter2"));
}
