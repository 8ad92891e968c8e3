// crates/langflow-mcp/src/registry/admin.rs
// ============================================================================
// Module: Administration Tools
// Description: Monitoring, users, API keys, authentication, and server info.
// Purpose: Declare administrative tool schemas and their remote operations.
// Dependencies: serde_json
// ============================================================================

use serde_json::json;

use super::FLOW_ID;
use super::PAGE_SIZE;
use super::ToolSpec;
use super::flag;
use super::no_arguments;
use super::optional_text;
use crate::operation::Operation;
use crate::operation::Sensitive;
use crate::schema::EMPTY_UPDATE_MESSAGE;
use crate::schema::ObjectSchema;
use crate::schema::Rule;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Monitor message identifier.
const MESSAGE_ID: Rule = Rule::uuid("Invalid message ID format");

/// User identifier.
const USER_ID: Rule = Rule::uuid("Invalid user ID format");

/// API key identifier.
const API_KEY_ID: Rule = Rule::uuid("Invalid API key ID format");

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Monitor, user, key, auth, and misc tools.
pub(super) fn specs() -> Vec<ToolSpec> {
    let mut specs = monitor_specs();
    specs.extend(account_specs());
    specs.extend(server_specs());
    specs
}

/// Monitor tools.
#[allow(clippy::too_many_lines, reason = "Flat tool catalog.")]
fn monitor_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "get_monitor_builds",
            "Get recorded vertex builds for a flow.",
            ObjectSchema::strict().required("flow_id", FLOW_ID, "Flow ID"),
            |args, _| Ok(Operation::GetMonitorBuilds { flow_id: args.text("flow_id")? }),
        ),
        ToolSpec::new(
            "delete_monitor_builds",
            "Delete recorded vertex builds for a flow.",
            ObjectSchema::strict().required("flow_id", FLOW_ID, "Flow ID"),
            |args, _| Ok(Operation::DeleteMonitorBuilds { flow_id: args.text("flow_id")? }),
        )
        .acknowledged("Monitor builds deleted successfully"),
        ToolSpec::new(
            "get_monitor_messages",
            "List chat messages with optional filters.",
            ObjectSchema::strict()
                .optional("flow_id", FLOW_ID, "Flow filter")
                .optional("session_id", Rule::text(), "Session filter")
                .optional("sender", Rule::text(), "Sender filter")
                .optional("sender_name", Rule::text(), "Sender name filter")
                .optional("order_by", Rule::text(), "Sort column"),
            |args, _| Ok(Operation::GetMonitorMessages(args.decode()?)),
        ),
        ToolSpec::new(
            "get_monitor_message",
            "Get a single chat message by ID.",
            ObjectSchema::strict().required("message_id", MESSAGE_ID, "Message ID"),
            |args, _| Ok(Operation::GetMonitorMessage { message_id: args.text("message_id")? }),
        ),
        ToolSpec::new(
            "delete_monitor_messages",
            "Delete chat messages by ID.",
            ObjectSchema::strict().required(
                "message_ids",
                Rule::non_empty_list(MESSAGE_ID, "At least one message ID is required"),
                "Message IDs",
            ),
            |args, _| {
                Ok(Operation::DeleteMonitorMessages { message_ids: args.text_list("message_ids")? })
            },
        )
        .acknowledged("Monitor messages deleted successfully"),
        ToolSpec::new(
            "get_monitor_sessions",
            "List chat session IDs, optionally for one flow.",
            ObjectSchema::strict().optional("flow_id", FLOW_ID, "Flow filter"),
            |args, _| Ok(Operation::GetMonitorSessions { flow_id: optional_text(&args, "flow_id") }),
        ),
        ToolSpec::new(
            "get_monitor_session_messages",
            "List the messages of a chat session.",
            ObjectSchema::strict().required(
                "session_id",
                Rule::required_text("Session ID is required"),
                "Session ID",
            ),
            |args, _| {
                Ok(Operation::GetMonitorSessionMessages { session_id: args.text("session_id")? })
            },
        ),
        ToolSpec::new(
            "migrate_monitor_session",
            "Move the messages of one session to a new session ID.",
            ObjectSchema::strict()
                .required(
                    "old_session_id",
                    Rule::required_text("Old session ID is required"),
                    "Current session ID",
                )
                .required(
                    "new_session_id",
                    Rule::required_text("New session ID is required"),
                    "Replacement session ID",
                ),
            |args, _| {
                Ok(Operation::MigrateMonitorSession {
                    old_session_id: args.text("old_session_id")?,
                    new_session_id: args.text("new_session_id")?,
                })
            },
        ),
        ToolSpec::new(
            "get_monitor_transactions",
            "List component transactions for a flow.",
            ObjectSchema::strict()
                .required("flow_id", FLOW_ID, "Flow ID")
                .optional("page", Rule::page(), "Page number for pagination")
                .optional("size", PAGE_SIZE, "Number of items per page (max 100)"),
            |args, _| Ok(Operation::GetMonitorTransactions(args.decode()?)),
        ),
    ]
}

/// User, API key, and authentication tools.
#[allow(clippy::too_many_lines, reason = "Flat tool catalog.")]
fn account_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_users",
            "List users (superuser only).",
            ObjectSchema::strict()
                .optional("skip", Rule::non_negative(), "Rows to skip")
                .optional("limit", Rule::page_size("Limit cannot exceed 100"), "Rows to return"),
            |args, _| Ok(Operation::ListUsers(args.decode()?)),
        ),
        ToolSpec::new(
            "get_current_user",
            "Get the user that owns the configured API key.",
            no_arguments(),
            |_, _| Ok(Operation::GetCurrentUser),
        ),
        ToolSpec::new(
            "get_user",
            "Get a user by ID.",
            ObjectSchema::strict().required("user_id", USER_ID, "User ID"),
            |args, _| Ok(Operation::GetUser { user_id: args.text("user_id")? }),
        ),
        ToolSpec::new(
            "update_user",
            "Update a user. Pass user_id and at least one field to change.",
            ObjectSchema::strict()
                .required("user_id", USER_ID, "User ID")
                .optional(
                    "username",
                    Rule::name("Username is required", "Username too long"),
                    "New username",
                )
                .optional("password", Rule::required_text("Password cannot be empty"), "Password")
                .optional("profile_image", Rule::text(), "Profile image path")
                .at_least_one_of(&["username", "password", "profile_image"], EMPTY_UPDATE_MESSAGE),
            |args, _| {
                Ok(Operation::UpdateUser { user_id: args.text("user_id")?, update: args.decode()? })
            },
        ),
        ToolSpec::new(
            "reset_user_password",
            "Reset a user's password.",
            ObjectSchema::strict()
                .required("user_id", USER_ID, "User ID")
                .required(
                    "new_password",
                    Rule::min_text(8, "Password must be at least 8 characters"),
                    "Replacement password",
                ),
            |args, _| {
                Ok(Operation::ResetUserPassword {
                    user_id: args.text("user_id")?,
                    new_password: Sensitive::new(args.text("new_password")?),
                })
            },
        ),
        ToolSpec::new(
            "list_api_keys",
            "List API keys of the current user.",
            no_arguments(),
            |_, _| Ok(Operation::ListApiKeys),
        ),
        ToolSpec::new(
            "create_api_key",
            "Create an API key.",
            ObjectSchema::strict().required(
                "name",
                Rule::name("API key name is required", "API key name too long"),
                "Key label",
            ),
            |args, _| Ok(Operation::CreateApiKey { name: args.text("name")? }),
        ),
        ToolSpec::new(
            "delete_api_key",
            "Delete an API key by ID.",
            ObjectSchema::strict().required("api_key_id", API_KEY_ID, "API key ID"),
            |args, _| Ok(Operation::DeleteApiKey { api_key_id: args.text("api_key_id")? }),
        )
        .acknowledged("API key deleted successfully"),
        ToolSpec::new(
            "login",
            "Log in with username and password.",
            ObjectSchema::strict()
                .required("username", Rule::required_text("Username is required"), "Username")
                .required("password", Rule::required_text("Password is required"), "Password"),
            |args, _| {
                Ok(Operation::Login {
                    username: args.text("username")?,
                    password: Sensitive::new(args.text("password")?),
                })
            },
        ),
        ToolSpec::new(
            "auto_login",
            "Log in automatically when the server allows it.",
            no_arguments(),
            |_, _| Ok(Operation::AutoLogin),
        ),
        ToolSpec::new(
            "refresh_token",
            "Refresh the access token of the current session.",
            no_arguments(),
            |_, _| Ok(Operation::RefreshToken),
        ),
        ToolSpec::new("logout", "Log out the current session.", no_arguments(), |_, _| {
            Ok(Operation::Logout)
        }),
    ]
}

/// Server information tools.
fn server_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "get_version",
            "Get the Langflow server version.",
            no_arguments(),
            |_, _| Ok(Operation::GetVersion),
        ),
        ToolSpec::new(
            "get_task_status",
            "Get the status of a background task.",
            ObjectSchema::strict().required(
                "task_id",
                Rule::required_text("Task ID is required"),
                "Task ID",
            ),
            |args, _| Ok(Operation::GetTaskStatus { task_id: args.text("task_id")? }),
        ),
        ToolSpec::new(
            "list_starter_projects",
            "List the starter project templates.",
            no_arguments(),
            |_, _| Ok(Operation::ListStarterProjects),
        ),
        ToolSpec::new(
            "get_logs",
            "Get recent server logs.",
            ObjectSchema::strict().defaulted(
                "stream",
                Rule::boolean(),
                json!(false),
                "Request a streamed log tail",
            ),
            |args, _| Ok(Operation::GetLogs { stream: flag(&args, "stream", false) }),
        ),
        ToolSpec::new(
            "list_elevenlabs_voices",
            "List the ElevenLabs voices available to voice mode.",
            no_arguments(),
            |_, _| Ok(Operation::ListElevenLabsVoices),
        ),
    ]
}
