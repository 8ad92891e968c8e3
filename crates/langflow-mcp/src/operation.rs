// crates/langflow-mcp/src/operation.rs
// ============================================================================
// Module: Remote Operations
// Description: Typed Langflow REST operations and their request plans.
// Purpose: Decouple argument reshaping from HTTP execution.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! Every tool resolves to one [`Operation`]. An operation knows which REST
//! endpoint it targets and how its inputs map onto path segments, query
//! parameters, and the request body; [`Operation::into_plan`] renders that as
//! a transport-neutral [`RequestPlan`]. Paths are relative to
//! `{base_url}/api/v1` and are held as raw segments so identifiers are
//! percent-encoded by the URL builder, never spliced into strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::client::ApiError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying a Langflow store API key.
pub const STORE_API_KEY_HEADER: &str = "x-store-api-key";

// ============================================================================
// SECTION: Shared Types
// ============================================================================

/// String whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive(String);

impl Sensitive {
    /// Wraps a sensitive value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Sensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

/// File bytes destined for a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// Optional MIME type.
    pub content_type: Option<String>,
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Inline file object accepted by flow and project uploads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilePayload {
    /// File name.
    pub name: String,
    /// File content as text.
    pub content: String,
    /// Optional MIME type.
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

/// Build event delivery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventDelivery {
    /// Client polls for events.
    #[default]
    Polling,
    /// Server streams events.
    Streaming,
    /// Events are returned inline.
    Direct,
}

impl EventDelivery {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polling => "polling",
            Self::Streaming => "streaming",
            Self::Direct => "direct",
        }
    }
}

/// Accepted wire values for [`EventDelivery`].
pub const EVENT_DELIVERY_VALUES: &[&str] = &["polling", "streaming", "direct"];

// ============================================================================
// SECTION: Request Bodies
// ============================================================================

/// Flow creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCreate {
    /// Flow name.
    pub name: String,
    /// Flow description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Flow graph data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    /// Owning folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Partial flow update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement graph data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    /// New owning folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Flow listing filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListFlowsQuery {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// Folder filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// Only list component flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_only: Option<bool>,
    /// Disable pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_all: Option<bool>,
}

/// Page selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageQuery {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// Folder creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCreate {
    /// Folder name.
    pub name: String,
    /// Folder description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Partial folder update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New parent folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Project creation payload; also used for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Variable creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCreate {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: Sensitive,
    /// Variable type, such as `Credential` or `Generic`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Component fields the variable applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_fields: Option<Vec<String>>,
}

/// Partial variable update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Sensitive>,
    /// New type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Flow run input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunFlowInput {
    /// Chat or text input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    /// Output component type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    /// Input component type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Per-component parameter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweaks: Option<Map<String, Value>>,
}

/// Webhook trigger input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WebhookInput {
    /// Input payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    /// Per-component parameter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweaks: Option<Map<String, Value>>,
}

/// Advanced run request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAdvancedRequest {
    /// Input value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    /// Input component type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Output component type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    /// Output component to read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_component: Option<String>,
    /// Per-component parameter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweaks: Option<Map<String, Value>>,
    /// Conversation session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Stream output.
    #[serde(default)]
    pub stream: bool,
}

/// Inputs-and-tweaks payload for legacy process and predict endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRunRequest {
    /// Flow inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Map<String, Value>>,
    /// Per-component parameter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweaks: Option<Map<String, Value>>,
}

/// Flow build body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildFlowBody {
    /// Build inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Map<String, Value>>,
    /// Graph override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    /// Uploaded file paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

/// Flow build query options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFlowQuery {
    /// Stop at this component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_component_id: Option<String>,
    /// Start from this component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_component_id: Option<String>,
    /// Persist build logs.
    pub log_builds: bool,
    /// Flow name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
    /// Event delivery mode.
    pub event_delivery: EventDelivery,
}

/// Vertex ordering request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildVerticesRequest {
    /// Graph override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    /// Stop at this component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_component_id: Option<String>,
    /// Start from this component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_component_id: Option<String>,
}

/// Monitor message filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MonitorMessagesQuery {
    /// Flow filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    /// Session filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Sender filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Sender name filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Sort column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

/// Monitor transaction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsQuery {
    /// Flow filter.
    pub flow_id: String,
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// User listing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserListQuery {
    /// Rows to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    /// Rows to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Partial user update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Sensitive>,
    /// New profile image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Store component listing filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreComponentsQuery {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Tag filter; each tag is sent as its own `tags` parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Custom component creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomComponentCreate {
    /// Component source code.
    pub code: String,
    /// Component name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared return type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// One Langflow REST call.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `POST /flows/`.
    CreateFlow(FlowCreate),
    /// `GET /flows/`.
    ListFlows(ListFlowsQuery),
    /// `GET /flows/{id}`.
    GetFlow {
        /// Flow identifier.
        flow_id: String,
    },
    /// `PATCH /flows/{id}`.
    UpdateFlow {
        /// Flow identifier.
        flow_id: String,
        /// Fields to change.
        update: FlowUpdate,
    },
    /// `DELETE /flows/{id}`.
    DeleteFlow {
        /// Flow identifier.
        flow_id: String,
    },
    /// `DELETE /flows/` with an id array body.
    DeleteFlows {
        /// Flow identifiers.
        flow_ids: Vec<String>,
    },
    /// `GET /all`, flattened into a component list.
    ListComponents,
    /// `POST /run/{id_or_name}`.
    RunFlow {
        /// Flow identifier or endpoint name.
        flow_id_or_name: String,
        /// Run input.
        input: RunFlowInput,
        /// Stream output.
        stream: bool,
    },
    /// `POST /run/advanced/{id}`.
    RunFlowAdvanced {
        /// Flow identifier.
        flow_id: String,
        /// Run request.
        request: RunAdvancedRequest,
    },
    /// `POST /webhook/{id_or_name}`.
    TriggerWebhook {
        /// Flow identifier or endpoint name.
        flow_id_or_name: String,
        /// Webhook input.
        input: WebhookInput,
    },
    /// `POST /flows/upload/` (multipart).
    UploadFlow(FileUpload),
    /// `POST /flows/download/`.
    DownloadFlows {
        /// Flow identifiers.
        flow_ids: Vec<String>,
    },
    /// `GET /flows/basic_examples/`.
    GetBasicExamples,
    /// `POST /flows/batch/`.
    BatchCreateFlows {
        /// Flows to create.
        flows: Vec<FlowCreate>,
    },
    /// `GET /flows/public_flow/{id}`.
    GetPublicFlow {
        /// Flow identifier.
        flow_id: String,
    },
    /// `GET /folders/`.
    ListFolders(PageQuery),
    /// `POST /folders/`.
    CreateFolder(FolderCreate),
    /// `GET /folders/{id}`.
    GetFolder {
        /// Folder identifier.
        folder_id: String,
    },
    /// `PATCH /folders/{id}`.
    UpdateFolder {
        /// Folder identifier.
        folder_id: String,
        /// Fields to change.
        update: FolderUpdate,
    },
    /// `DELETE /folders/{id}`.
    DeleteFolder {
        /// Folder identifier.
        folder_id: String,
    },
    /// `GET /folders/download/{id}`.
    DownloadFolder {
        /// Folder identifier.
        folder_id: String,
    },
    /// `POST /folders/upload/` (multipart).
    UploadFolder(FileUpload),
    /// `GET /projects/`.
    ListProjects(PageQuery),
    /// `POST /projects/`.
    CreateProject(ProjectFields),
    /// `GET /projects/{id}`.
    GetProject {
        /// Project identifier.
        project_id: String,
    },
    /// `PATCH /projects/{id}`.
    UpdateProject {
        /// Project identifier.
        project_id: String,
        /// Fields to change.
        update: ProjectFields,
    },
    /// `DELETE /projects/{id}`.
    DeleteProject {
        /// Project identifier.
        project_id: String,
    },
    /// `POST /projects/upload/` (multipart).
    UploadProject(FileUpload),
    /// `GET /projects/download/{id}`.
    DownloadProject {
        /// Project identifier.
        project_id: String,
    },
    /// `GET /variables/`.
    ListVariables,
    /// `POST /variables/`.
    CreateVariable(VariableCreate),
    /// `PATCH /variables/{id}`.
    UpdateVariable {
        /// Variable identifier.
        variable_id: String,
        /// Fields to change.
        update: VariableUpdate,
    },
    /// `DELETE /variables/{id}`.
    DeleteVariable {
        /// Variable identifier.
        variable_id: String,
    },
    /// `POST /build/{id}/flow`.
    BuildFlow {
        /// Flow identifier.
        flow_id: String,
        /// Build body.
        body: BuildFlowBody,
        /// Build options.
        query: BuildFlowQuery,
    },
    /// `GET /build/{job}/events`.
    GetBuildStatus {
        /// Build job identifier.
        job_id: String,
        /// Event delivery mode.
        event_delivery: EventDelivery,
    },
    /// `POST /build/{job}/cancel`.
    CancelBuild {
        /// Build job identifier.
        job_id: String,
    },
    /// `POST /build/{id}/vertices`.
    BuildVertices {
        /// Flow identifier.
        flow_id: String,
        /// Ordering request.
        request: BuildVerticesRequest,
    },
    /// `GET /build/{id}/vertices/{vertex}`.
    GetVertex {
        /// Flow identifier.
        flow_id: String,
        /// Vertex identifier.
        vertex_id: String,
    },
    /// `GET /build/{flow}/{vertex}/stream`.
    StreamVertexBuild {
        /// Flow identifier.
        flow_id: String,
        /// Vertex identifier.
        vertex_id: String,
    },
    /// `GET /knowledge_bases`.
    ListKnowledgeBases,
    /// `GET /knowledge_bases/{name}`.
    GetKnowledgeBase {
        /// Knowledge base name.
        kb_name: String,
    },
    /// `DELETE /knowledge_bases/{name}`.
    DeleteKnowledgeBase {
        /// Knowledge base name.
        kb_name: String,
    },
    /// `DELETE /knowledge_bases` with a name list body.
    BulkDeleteKnowledgeBases {
        /// Knowledge base names.
        kb_names: Vec<String>,
    },
    /// `POST /knowledge_bases/` (multipart).
    UploadKnowledgeBase {
        /// Knowledge base name.
        kb_name: String,
        /// Source document.
        upload: FileUpload,
    },
    /// `POST /files/upload/{flow}` (multipart).
    UploadFile {
        /// Owning flow.
        flow_id: String,
        /// File to store.
        upload: FileUpload,
    },
    /// `GET /files/download/{flow}/{name}`.
    DownloadFile {
        /// Owning flow.
        flow_id: String,
        /// Stored file name.
        file_name: String,
    },
    /// `GET /files/list/{flow}`.
    ListFiles {
        /// Owning flow.
        flow_id: String,
    },
    /// `DELETE /files/delete/{flow}/{name}`.
    DeleteFile {
        /// Owning flow.
        flow_id: String,
        /// Stored file name.
        file_name: String,
    },
    /// `GET /files/images/{flow}/{name}`.
    GetFileImage {
        /// Owning flow.
        flow_id: String,
        /// Stored image name.
        file_name: String,
    },
    /// `GET /files/profile_pictures/list`.
    ListProfilePictures,
    /// `GET /files/profile_pictures/{folder}/{name}`.
    GetProfilePicture {
        /// Picture folder.
        folder_name: String,
        /// Picture file name.
        file_name: String,
    },
    /// `POST /validate/code`.
    ValidateCode {
        /// Component source code.
        code: String,
    },
    /// `POST /validate/prompt`.
    ValidatePrompt {
        /// Prompt template.
        prompt: String,
    },
    /// `POST /process/{id}`.
    ProcessFlow {
        /// Flow identifier.
        flow_id: String,
        /// Inputs and tweaks.
        request: LegacyRunRequest,
    },
    /// `POST /predict/{id}`.
    PredictFlow {
        /// Flow identifier.
        flow_id: String,
        /// Inputs and tweaks.
        request: LegacyRunRequest,
    },
    /// `GET /monitor/builds`.
    GetMonitorBuilds {
        /// Flow filter.
        flow_id: String,
    },
    /// `DELETE /monitor/builds`.
    DeleteMonitorBuilds {
        /// Flow filter.
        flow_id: String,
    },
    /// `GET /monitor/messages`.
    GetMonitorMessages(MonitorMessagesQuery),
    /// `GET /monitor/messages/{id}`.
    GetMonitorMessage {
        /// Message identifier.
        message_id: String,
    },
    /// `DELETE /monitor/messages` with an id array body.
    DeleteMonitorMessages {
        /// Message identifiers.
        message_ids: Vec<String>,
    },
    /// `GET /monitor/messages/sessions`.
    GetMonitorSessions {
        /// Optional flow filter.
        flow_id: Option<String>,
    },
    /// `GET /monitor/messages/session/{session}`.
    GetMonitorSessionMessages {
        /// Session identifier.
        session_id: String,
    },
    /// `PATCH /monitor/messages/session/{old}`.
    MigrateMonitorSession {
        /// Current session identifier.
        old_session_id: String,
        /// Replacement session identifier.
        new_session_id: String,
    },
    /// `GET /monitor/transactions`.
    GetMonitorTransactions(TransactionsQuery),
    /// `GET /users/`.
    ListUsers(UserListQuery),
    /// `GET /users/whoami`.
    GetCurrentUser,
    /// `GET /users/{id}`.
    GetUser {
        /// User identifier.
        user_id: String,
    },
    /// `PATCH /users/{id}`.
    UpdateUser {
        /// User identifier.
        user_id: String,
        /// Fields to change.
        update: UserUpdate,
    },
    /// `PATCH /users/{id}/reset-password`.
    ResetUserPassword {
        /// User identifier.
        user_id: String,
        /// Replacement password.
        new_password: Sensitive,
    },
    /// `GET /api_key/`.
    ListApiKeys,
    /// `POST /api_key/`.
    CreateApiKey {
        /// Key label.
        name: String,
    },
    /// `DELETE /api_key/{id}`.
    DeleteApiKey {
        /// Key identifier.
        api_key_id: String,
    },
    /// `POST /login` (form encoded).
    Login {
        /// Account name.
        username: String,
        /// Account password.
        password: Sensitive,
    },
    /// `GET /auto_login`.
    AutoLogin,
    /// `POST /refresh`.
    RefreshToken,
    /// `POST /logout`.
    Logout,
    /// `GET /version`.
    GetVersion,
    /// `GET /task/{id}`.
    GetTaskStatus {
        /// Task identifier.
        task_id: String,
    },
    /// `GET /starter-projects/`.
    ListStarterProjects,
    /// `GET /logs`.
    GetLogs {
        /// Request a streamed log tail.
        stream: bool,
    },
    /// `GET /voice/elevenlabs/voice_ids`.
    ListElevenLabsVoices,
    /// `GET /store/check/`.
    CheckStore,
    /// `GET /store/check/api_key` with the key in `x-store-api-key`.
    CheckStoreApiKey {
        /// Store API key.
        api_key: Sensitive,
    },
    /// `GET /store/components/`.
    ListStoreComponents(StoreComponentsQuery),
    /// `GET /store/components/{id}`.
    GetStoreComponent {
        /// Store component identifier.
        component_id: String,
    },
    /// `GET /store/tags`.
    ListStoreTags,
    /// `GET /store/users/likes`.
    GetUserLikes,
    /// `GET /custom_component`.
    ListCustomComponents,
    /// `POST /custom_component`.
    CreateCustomComponent(CustomComponentCreate),
}

// ============================================================================
// SECTION: Request Plans
// ============================================================================

/// Request body shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON body.
    Json(Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
    /// Multipart body with a single `file` part.
    Multipart(FileUpload),
}

/// How a successful response body is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    /// JSON document; an empty body becomes `null`.
    Json,
    /// Raw bytes, returned base64-encoded.
    Binary {
        /// Name reported alongside the bytes.
        file_name: String,
    },
    /// JSON when the server says so, raw bytes otherwise.
    JsonOrBinary {
        /// Name reported alongside the bytes.
        file_name: String,
    },
    /// Component catalog flattened into a list.
    Components,
}

/// Transport-neutral description of one REST call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    /// HTTP method.
    pub method: Method,
    /// Path segments below `/api/v1`; an empty last segment yields a trailing slash.
    pub path: Vec<String>,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Extra request headers; values are never logged.
    pub headers: Vec<(&'static str, Sensitive)>,
    /// Request body.
    pub body: RequestBody,
    /// Response interpretation.
    pub response: ResponseKind,
    /// Failure message prefix.
    pub context: String,
}

impl RequestPlan {
    /// Starts a plan with a JSON response and no body.
    fn new(method: Method, path: &[&str], context: impl Into<String>) -> Self {
        Self {
            method,
            path: path.iter().map(|segment| (*segment).to_string()).collect(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            response: ResponseKind::Json,
            context: context.into(),
        }
    }

    /// Sets a JSON body from a serializable value.
    fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::request(&self.context, err.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Sets query parameters from a serializable struct.
    fn query<T: Serialize>(mut self, query: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(query)
            .map_err(|err| ApiError::request(&self.context, err.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ApiError::request(&self.context, "query must be an object"));
        };
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        self.query.push((key.clone(), render_param(item)));
                    }
                }
                other => self.query.push((key, render_param(other))),
            }
        }
        Ok(self)
    }

    /// Adds one query parameter.
    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Adds one request header.
    fn header(mut self, name: &'static str, value: Sensitive) -> Self {
        self.headers.push((name, value));
        self
    }

    /// Sets the body.
    fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the response interpretation.
    fn response(mut self, response: ResponseKind) -> Self {
        self.response = response;
        self
    }
}

/// Renders a scalar query value; strings are sent without quotes.
fn render_param(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

impl Operation {
    /// Renders the REST call for this operation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] when a body or query cannot be serialized.
    #[allow(clippy::too_many_lines, reason = "One arm per remote endpoint.")]
    pub fn into_plan(self) -> Result<RequestPlan, ApiError> {
        use RequestPlan as Plan;

        let plan = match self {
            Self::CreateFlow(flow) => {
                Plan::new(Method::POST, &["flows", ""], "Failed to create flow").json(&flow)?
            }
            Self::ListFlows(query) => {
                Plan::new(Method::GET, &["flows", ""], "Failed to list flows").query(&query)?
            }
            Self::GetFlow { flow_id } => {
                Plan::new(Method::GET, &["flows", &flow_id], format!("Failed to get flow {flow_id}"))
            }
            Self::UpdateFlow { flow_id, update } => Plan::new(
                Method::PATCH,
                &["flows", &flow_id],
                format!("Failed to update flow {flow_id}"),
            )
            .json(&update)?,
            Self::DeleteFlow { flow_id } => Plan::new(
                Method::DELETE,
                &["flows", &flow_id],
                format!("Failed to delete flow {flow_id}"),
            ),
            Self::DeleteFlows { flow_ids } => {
                Plan::new(Method::DELETE, &["flows", ""], "Failed to delete flows").json(&flow_ids)?
            }
            Self::ListComponents => Plan::new(Method::GET, &["all"], "Failed to list components")
                .response(ResponseKind::Components),
            Self::RunFlow { flow_id_or_name, input, stream } => {
                let context = format!("Failed to run flow {flow_id_or_name}");
                let mut body = serde_json::to_value(&input)
                    .map_err(|err| ApiError::request(&context, err.to_string()))?;
                if let Value::Object(map) = &mut body {
                    map.insert("stream".to_string(), Value::Bool(stream));
                }
                Plan::new(Method::POST, &["run", &flow_id_or_name], context)
                    .body(RequestBody::Json(body))
            }
            Self::RunFlowAdvanced { flow_id, request } => Plan::new(
                Method::POST,
                &["run", "advanced", &flow_id],
                format!("Failed to run flow {flow_id} (advanced)"),
            )
            .json(&request)?,
            Self::TriggerWebhook { flow_id_or_name, input } => Plan::new(
                Method::POST,
                &["webhook", &flow_id_or_name],
                format!("Failed to trigger webhook for flow {flow_id_or_name}"),
            )
            .json(&input)?,
            Self::UploadFlow(upload) => {
                Plan::new(Method::POST, &["flows", "upload", ""], "Failed to upload flow")
                    .body(RequestBody::Multipart(upload))
            }
            Self::DownloadFlows { flow_ids } => {
                Plan::new(Method::POST, &["flows", "download", ""], "Failed to download flows")
                    .json(&flow_ids)?
                    .response(ResponseKind::JsonOrBinary { file_name: "flows.zip".to_string() })
            }
            Self::GetBasicExamples => Plan::new(
                Method::GET,
                &["flows", "basic_examples", ""],
                "Failed to get basic examples",
            ),
            Self::BatchCreateFlows { flows } => {
                Plan::new(Method::POST, &["flows", "batch", ""], "Failed to batch create flows")
                    .json(&flows)?
            }
            Self::GetPublicFlow { flow_id } => Plan::new(
                Method::GET,
                &["flows", "public_flow", &flow_id],
                format!("Failed to get public flow {flow_id}"),
            ),
            Self::ListFolders(query) => {
                Plan::new(Method::GET, &["folders", ""], "Failed to list folders").query(&query)?
            }
            Self::CreateFolder(folder) => {
                Plan::new(Method::POST, &["folders", ""], "Failed to create folder").json(&folder)?
            }
            Self::GetFolder { folder_id } => Plan::new(
                Method::GET,
                &["folders", &folder_id],
                format!("Failed to get folder {folder_id}"),
            ),
            Self::UpdateFolder { folder_id, update } => Plan::new(
                Method::PATCH,
                &["folders", &folder_id],
                format!("Failed to update folder {folder_id}"),
            )
            .json(&update)?,
            Self::DeleteFolder { folder_id } => Plan::new(
                Method::DELETE,
                &["folders", &folder_id],
                format!("Failed to delete folder {folder_id}"),
            ),
            Self::DownloadFolder { folder_id } => Plan::new(
                Method::GET,
                &["folders", "download", &folder_id],
                format!("Failed to download folder {folder_id}"),
            )
            .response(ResponseKind::Binary { file_name: format!("folder-{folder_id}.zip") }),
            Self::UploadFolder(upload) => {
                Plan::new(Method::POST, &["folders", "upload", ""], "Failed to upload folder")
                    .body(RequestBody::Multipart(upload))
            }
            Self::ListProjects(query) => {
                Plan::new(Method::GET, &["projects", ""], "Failed to list projects")
                    .query(&query)?
            }
            Self::CreateProject(project) => {
                Plan::new(Method::POST, &["projects", ""], "Failed to create project")
                    .json(&project)?
            }
            Self::GetProject { project_id } => Plan::new(
                Method::GET,
                &["projects", &project_id],
                format!("Failed to get project {project_id}"),
            ),
            Self::UpdateProject { project_id, update } => Plan::new(
                Method::PATCH,
                &["projects", &project_id],
                format!("Failed to update project {project_id}"),
            )
            .json(&update)?,
            Self::DeleteProject { project_id } => Plan::new(
                Method::DELETE,
                &["projects", &project_id],
                format!("Failed to delete project {project_id}"),
            ),
            Self::UploadProject(upload) => {
                Plan::new(Method::POST, &["projects", "upload", ""], "Failed to upload project")
                    .body(RequestBody::Multipart(upload))
            }
            Self::DownloadProject { project_id } => Plan::new(
                Method::GET,
                &["projects", "download", &project_id],
                format!("Failed to download project {project_id}"),
            )
            .response(ResponseKind::JsonOrBinary { file_name: format!("project-{project_id}.zip") }),
            Self::ListVariables => {
                Plan::new(Method::GET, &["variables", ""], "Failed to list variables")
            }
            Self::CreateVariable(variable) => {
                Plan::new(Method::POST, &["variables", ""], "Failed to create variable")
                    .json(&variable)?
            }
            Self::UpdateVariable { variable_id, update } => Plan::new(
                Method::PATCH,
                &["variables", &variable_id],
                format!("Failed to update variable {variable_id}"),
            )
            .json(&update)?,
            Self::DeleteVariable { variable_id } => Plan::new(
                Method::DELETE,
                &["variables", &variable_id],
                format!("Failed to delete variable {variable_id}"),
            ),
            Self::BuildFlow { flow_id, body, query } => Plan::new(
                Method::POST,
                &["build", &flow_id, "flow"],
                format!("Failed to build flow {flow_id}"),
            )
            .json(&body)?
            .query(&query)?,
            Self::GetBuildStatus { job_id, event_delivery } => Plan::new(
                Method::GET,
                &["build", &job_id, "events"],
                format!("Failed to get build status for job {job_id}"),
            )
            .param("event_delivery", event_delivery.as_str()),
            Self::CancelBuild { job_id } => Plan::new(
                Method::POST,
                &["build", &job_id, "cancel"],
                format!("Failed to cancel build job {job_id}"),
            ),
            Self::BuildVertices { flow_id, request } => Plan::new(
                Method::POST,
                &["build", &flow_id, "vertices"],
                format!("Failed to build vertices for flow {flow_id}"),
            )
            .json(&request)?,
            Self::GetVertex { flow_id, vertex_id } => Plan::new(
                Method::GET,
                &["build", &flow_id, "vertices", &vertex_id],
                format!("Failed to get vertex {vertex_id}"),
            ),
            Self::StreamVertexBuild { flow_id, vertex_id } => Plan::new(
                Method::GET,
                &["build", &flow_id, &vertex_id, "stream"],
                format!("Failed to stream vertex build {vertex_id}"),
            ),
            Self::ListKnowledgeBases => {
                Plan::new(Method::GET, &["knowledge_bases"], "Failed to list knowledge bases")
            }
            Self::GetKnowledgeBase { kb_name } => Plan::new(
                Method::GET,
                &["knowledge_bases", &kb_name],
                format!("Failed to get knowledge base {kb_name}"),
            ),
            Self::DeleteKnowledgeBase { kb_name } => Plan::new(
                Method::DELETE,
                &["knowledge_bases", &kb_name],
                format!("Failed to delete knowledge base {kb_name}"),
            ),
            Self::BulkDeleteKnowledgeBases { kb_names } => Plan::new(
                Method::DELETE,
                &["knowledge_bases"],
                "Failed to bulk delete knowledge bases",
            )
            .body(RequestBody::Json(json!({ "kb_names": kb_names }))),
            Self::UploadKnowledgeBase { kb_name, upload } => Plan::new(
                Method::POST,
                &["knowledge_bases", ""],
                format!("Failed to upload knowledge base {kb_name}"),
            )
            .param("kb_name", kb_name)
            .body(RequestBody::Multipart(upload)),
            Self::UploadFile { flow_id, upload } => Plan::new(
                Method::POST,
                &["files", "upload", &flow_id],
                format!("Failed to upload file to flow {flow_id}"),
            )
            .body(RequestBody::Multipart(upload)),
            Self::DownloadFile { flow_id, file_name } => Plan::new(
                Method::GET,
                &["files", "download", &flow_id, &file_name],
                format!("Failed to download file {file_name} from flow {flow_id}"),
            )
            .response(ResponseKind::Binary { file_name }),
            Self::ListFiles { flow_id } => Plan::new(
                Method::GET,
                &["files", "list", &flow_id],
                format!("Failed to list files for flow {flow_id}"),
            ),
            Self::DeleteFile { flow_id, file_name } => Plan::new(
                Method::DELETE,
                &["files", "delete", &flow_id, &file_name],
                format!("Failed to delete file {file_name} from flow {flow_id}"),
            ),
            Self::GetFileImage { flow_id, file_name } => Plan::new(
                Method::GET,
                &["files", "images", &flow_id, &file_name],
                format!("Failed to get image {file_name} from flow {flow_id}"),
            )
            .response(ResponseKind::Binary { file_name }),
            Self::ListProfilePictures => Plan::new(
                Method::GET,
                &["files", "profile_pictures", "list"],
                "Failed to list profile pictures",
            ),
            Self::GetProfilePicture { folder_name, file_name } => Plan::new(
                Method::GET,
                &["files", "profile_pictures", &folder_name, &file_name],
                format!("Failed to get profile picture {folder_name}/{file_name}"),
            )
            .response(ResponseKind::Binary { file_name }),
            Self::ValidateCode { code } => {
                Plan::new(Method::POST, &["validate", "code"], "Failed to validate code")
                    .body(RequestBody::Json(json!({ "code": code })))
            }
            Self::ValidatePrompt { prompt } => {
                Plan::new(Method::POST, &["validate", "prompt"], "Failed to validate prompt")
                    .body(RequestBody::Json(json!({ "prompt": prompt })))
            }
            Self::ProcessFlow { flow_id, request } => Plan::new(
                Method::POST,
                &["process", &flow_id],
                format!("Failed to process flow {flow_id}"),
            )
            .json(&request)?,
            Self::PredictFlow { flow_id, request } => Plan::new(
                Method::POST,
                &["predict", &flow_id],
                format!("Failed to predict flow {flow_id}"),
            )
            .json(&request)?,
            Self::GetMonitorBuilds { flow_id } => {
                Plan::new(Method::GET, &["monitor", "builds"], "Failed to get monitor builds")
                    .param("flow_id", flow_id)
            }
            Self::DeleteMonitorBuilds { flow_id } => Plan::new(
                Method::DELETE,
                &["monitor", "builds"],
                "Failed to delete monitor builds",
            )
            .param("flow_id", flow_id),
            Self::GetMonitorMessages(query) => {
                Plan::new(Method::GET, &["monitor", "messages"], "Failed to get monitor messages")
                    .query(&query)?
            }
            Self::GetMonitorMessage { message_id } => Plan::new(
                Method::GET,
                &["monitor", "messages", &message_id],
                format!("Failed to get monitor message {message_id}"),
            ),
            Self::DeleteMonitorMessages { message_ids } => Plan::new(
                Method::DELETE,
                &["monitor", "messages"],
                "Failed to delete monitor messages",
            )
            .json(&message_ids)?,
            Self::GetMonitorSessions { flow_id } => {
                let plan = Plan::new(
                    Method::GET,
                    &["monitor", "messages", "sessions"],
                    "Failed to get monitor sessions",
                );
                match flow_id {
                    Some(flow_id) => plan.param("flow_id", flow_id),
                    None => plan,
                }
            }
            Self::GetMonitorSessionMessages { session_id } => Plan::new(
                Method::GET,
                &["monitor", "messages", "session", &session_id],
                format!("Failed to get session messages for {session_id}"),
            ),
            Self::MigrateMonitorSession { old_session_id, new_session_id } => Plan::new(
                Method::PATCH,
                &["monitor", "messages", "session", &old_session_id],
                format!("Failed to migrate session {old_session_id}"),
            )
            .param("new_session_id", new_session_id),
            Self::GetMonitorTransactions(query) => Plan::new(
                Method::GET,
                &["monitor", "transactions"],
                "Failed to get monitor transactions",
            )
            .query(&query)?,
            Self::ListUsers(query) => {
                Plan::new(Method::GET, &["users", ""], "Failed to list users").query(&query)?
            }
            Self::GetCurrentUser => {
                Plan::new(Method::GET, &["users", "whoami"], "Failed to get current user")
            }
            Self::GetUser { user_id } => {
                Plan::new(Method::GET, &["users", &user_id], format!("Failed to get user {user_id}"))
            }
            Self::UpdateUser { user_id, update } => Plan::new(
                Method::PATCH,
                &["users", &user_id],
                format!("Failed to update user {user_id}"),
            )
            .json(&update)?,
            Self::ResetUserPassword { user_id, new_password } => Plan::new(
                Method::PATCH,
                &["users", &user_id, "reset-password"],
                format!("Failed to reset password for user {user_id}"),
            )
            .body(RequestBody::Json(json!({ "password": new_password.expose() }))),
            Self::ListApiKeys => {
                Plan::new(Method::GET, &["api_key", ""], "Failed to list API keys")
            }
            Self::CreateApiKey { name } => {
                Plan::new(Method::POST, &["api_key", ""], "Failed to create API key")
                    .body(RequestBody::Json(json!({ "name": name })))
            }
            Self::DeleteApiKey { api_key_id } => Plan::new(
                Method::DELETE,
                &["api_key", &api_key_id],
                format!("Failed to delete API key {api_key_id}"),
            ),
            Self::Login { username, password } => {
                Plan::new(Method::POST, &["login"], "Failed to login").body(RequestBody::Form(vec![
                    ("username".to_string(), username),
                    ("password".to_string(), password.expose().to_string()),
                ]))
            }
            Self::AutoLogin => Plan::new(Method::GET, &["auto_login"], "Failed to auto login"),
            Self::RefreshToken => Plan::new(Method::POST, &["refresh"], "Failed to refresh token"),
            Self::Logout => Plan::new(Method::POST, &["logout"], "Failed to logout"),
            Self::GetVersion => Plan::new(Method::GET, &["version"], "Failed to get version"),
            Self::GetTaskStatus { task_id } => Plan::new(
                Method::GET,
                &["task", &task_id],
                format!("Failed to get task status {task_id}"),
            ),
            Self::ListStarterProjects => Plan::new(
                Method::GET,
                &["starter-projects", ""],
                "Failed to list starter projects",
            ),
            Self::GetLogs { stream } => Plan::new(Method::GET, &["logs"], "Failed to get logs")
                .param("stream", stream.to_string()),
            Self::ListElevenLabsVoices => Plan::new(
                Method::GET,
                &["voice", "elevenlabs", "voice_ids"],
                "Failed to list ElevenLabs voices",
            ),
            Self::CheckStore => Plan::new(
                Method::GET,
                &["store", "check", ""],
                "Failed to check store availability",
            ),
            Self::CheckStoreApiKey { api_key } => Plan::new(
                Method::GET,
                &["store", "check", "api_key"],
                "Failed to check store API key",
            )
            .header(STORE_API_KEY_HEADER, api_key),
            Self::ListStoreComponents(query) => Plan::new(
                Method::GET,
                &["store", "components", ""],
                "Failed to list store components",
            )
            .query(&query)?,
            Self::GetStoreComponent { component_id } => Plan::new(
                Method::GET,
                &["store", "components", &component_id],
                format!("Failed to get store component {component_id}"),
            ),
            Self::ListStoreTags => {
                Plan::new(Method::GET, &["store", "tags"], "Failed to list store tags")
            }
            Self::GetUserLikes => {
                Plan::new(Method::GET, &["store", "users", "likes"], "Failed to get user likes")
            }
            Self::ListCustomComponents => Plan::new(
                Method::GET,
                &["custom_component"],
                "Failed to list custom components",
            ),
            Self::CreateCustomComponent(component) => Plan::new(
                Method::POST,
                &["custom_component"],
                "Failed to create custom component",
            )
            .json(&component)?,
        };
        Ok(plan)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
