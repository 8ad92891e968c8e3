// crates/langflow-mcp/src/registry/flows.rs
// ============================================================================
// Module: Flow Tools
// Description: Flow CRUD, execution, import/export, and component listing.
// Purpose: Declare flow tool schemas and their remote operations.
// Dependencies: serde_json
// ============================================================================

use serde_json::json;

use super::FLOW_ID;
use super::FOLDER_ID;
use super::PAGE_SIZE;
use super::ToolSpec;
use super::flag;
use super::inline_file_rule;
use super::inline_upload;
use super::no_arguments;
use crate::operation::Operation;
use crate::schema::EMPTY_UPDATE_MESSAGE;
use crate::schema::ObjectSchema;
use crate::schema::Rule;

// ============================================================================
// SECTION: Field Groups
// ============================================================================

/// Flow name rule.
const FLOW_NAME: Rule = Rule::name("Flow name is required", "Flow name too long");

/// Creation fields shared by `create_flow` and `batch_create_flows` items.
fn flow_fields(schema: ObjectSchema) -> ObjectSchema {
    schema
        .required("name", FLOW_NAME, "The name of the flow")
        .optional("description", Rule::text(), "Optional description of the flow")
        .optional("data", Rule::record(), "Optional flow graph data")
        .optional("folder_id", FOLDER_ID, "Optional folder ID to organize the flow")
}

/// Flow identifier list with a non-empty requirement.
fn flow_id_list() -> Rule {
    Rule::non_empty_list(FLOW_ID, "At least one flow ID is required")
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Flow tools; `max_file_bytes` bounds the inline upload.
#[allow(clippy::too_many_lines, reason = "Flat tool catalog.")]
pub(super) fn specs(max_file_bytes: usize) -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "create_flow",
            "Create a new Langflow flow. Pass name and optional description, data, folder_id.",
            flow_fields(ObjectSchema::strict()),
            |args, _| Ok(Operation::CreateFlow(args.decode()?)),
        ),
        ToolSpec::new(
            "list_flows",
            "List Langflow flows with optional pagination and filtering.",
            ObjectSchema::strict()
                .optional("page", Rule::page(), "Page number for pagination")
                .optional("size", PAGE_SIZE, "Number of items per page (max 100)")
                .optional("folder_id", FOLDER_ID, "Filter by folder ID")
                .optional("components_only", Rule::boolean(), "Return only components")
                .optional("get_all", Rule::boolean(), "Return all flows without pagination"),
            |args, _| Ok(Operation::ListFlows(args.decode()?)),
        ),
        ToolSpec::new(
            "get_flow",
            "Get details of a specific flow by ID.",
            ObjectSchema::strict().required("flow_id", FLOW_ID, "The ID of the flow to retrieve"),
            |args, _| Ok(Operation::GetFlow { flow_id: args.text("flow_id")? }),
        ),
        ToolSpec::new(
            "update_flow",
            "Update an existing flow. Pass flow_id and at least one field to change.",
            ObjectSchema::strict()
                .required("flow_id", FLOW_ID, "The ID of the flow to update")
                .optional("name", FLOW_NAME, "New name for the flow")
                .optional("description", Rule::text(), "New description for the flow")
                .optional("data", Rule::record(), "New flow graph data")
                .optional("folder_id", FOLDER_ID, "New folder ID")
                .at_least_one_of(&["name", "description", "data", "folder_id"], EMPTY_UPDATE_MESSAGE),
            |args, _| {
                Ok(Operation::UpdateFlow { flow_id: args.text("flow_id")?, update: args.decode()? })
            },
        ),
        ToolSpec::new(
            "delete_flow",
            "Delete a single flow by ID.",
            ObjectSchema::strict().required("flow_id", FLOW_ID, "The ID of the flow to delete"),
            |args, _| Ok(Operation::DeleteFlow { flow_id: args.text("flow_id")? }),
        )
        .acknowledged("Flow deleted successfully"),
        ToolSpec::new(
            "delete_flows",
            "Delete multiple flows at once. Pass an array of flow IDs.",
            ObjectSchema::strict().required("flow_ids", flow_id_list(), "Flow IDs to delete"),
            |args, _| Ok(Operation::DeleteFlows { flow_ids: args.text_list("flow_ids")? }),
        ),
        ToolSpec::new(
            "list_components",
            "List all available Langflow components with their types, names, and descriptions.",
            no_arguments(),
            |_, _| Ok(Operation::ListComponents),
        ),
        ToolSpec::new(
            "run_flow",
            "Run a flow by ID or endpoint name with the given input request.",
            ObjectSchema::strict()
                .required(
                    "flow_id_or_name",
                    Rule::required_text("Flow ID or name is required"),
                    "Flow ID or endpoint name",
                )
                .required(
                    "input_request",
                    Rule::object(
                        ObjectSchema::open()
                            .optional("input_value", Rule::text(), "Input text")
                            .optional("output_type", Rule::text(), "Output component type")
                            .optional("input_type", Rule::text(), "Input component type")
                            .optional("tweaks", Rule::record(), "Per-component overrides"),
                    ),
                    "Run input",
                )
                .defaulted("stream", Rule::boolean(), json!(false), "Stream the response"),
            |args, _| {
                Ok(Operation::RunFlow {
                    flow_id_or_name: args.text("flow_id_or_name")?,
                    input: args.decode_field("input_request")?,
                    stream: flag(&args, "stream", false),
                })
            },
        ),
        ToolSpec::new(
            "run_flow_advanced",
            "Run a flow with advanced options such as output component and session.",
            ObjectSchema::strict()
                .required("flow_id", FLOW_ID, "The ID of the flow to run")
                .optional("input_value", Rule::text(), "Input value")
                .optional("input_type", Rule::text(), "Input component type")
                .optional("output_type", Rule::text(), "Output component type")
                .optional("output_component", Rule::text(), "Output component to read")
                .optional("tweaks", Rule::record(), "Per-component overrides")
                .optional("session_id", Rule::text(), "Conversation session")
                .defaulted("stream", Rule::boolean(), json!(false), "Stream the response"),
            |args, _| {
                Ok(Operation::RunFlowAdvanced {
                    flow_id: args.text("flow_id")?,
                    request: args.decode()?,
                })
            },
        ),
        ToolSpec::new(
            "trigger_webhook",
            "Trigger a flow's webhook endpoint.",
            ObjectSchema::strict()
                .required(
                    "flow_id_or_name",
                    Rule::required_text("Flow ID or name is required"),
                    "Flow ID or endpoint name",
                )
                .required(
                    "input_request",
                    Rule::object(
                        ObjectSchema::open()
                            .optional("input_value", Rule::text(), "Webhook payload")
                            .optional("tweaks", Rule::record(), "Per-component overrides"),
                    ),
                    "Webhook input",
                ),
            |args, _| {
                Ok(Operation::TriggerWebhook {
                    flow_id_or_name: args.text("flow_id_or_name")?,
                    input: args.decode_field("input_request")?,
                })
            },
        ),
        ToolSpec::new(
            "upload_flow",
            "Upload a flow export file.",
            ObjectSchema::strict().required("file", inline_file_rule(max_file_bytes), "Flow file"),
            |args, guard| Ok(Operation::UploadFlow(inline_upload(&args, guard)?)),
        ),
        ToolSpec::new(
            "download_flows",
            "Download one or more flows; multiple flows arrive as a zip archive.",
            ObjectSchema::strict().required("flow_ids", flow_id_list(), "Flow IDs to download"),
            |args, _| Ok(Operation::DownloadFlows { flow_ids: args.text_list("flow_ids")? }),
        ),
        ToolSpec::new(
            "get_basic_examples",
            "List the basic example flows.",
            no_arguments(),
            |_, _| Ok(Operation::GetBasicExamples),
        ),
        ToolSpec::new(
            "batch_create_flows",
            "Create several flows in one request.",
            ObjectSchema::strict().required(
                "flows",
                Rule::non_empty_list(
                    Rule::object(flow_fields(ObjectSchema::open())),
                    "At least one flow is required",
                ),
                "Flows to create",
            ),
            |args, _| Ok(Operation::BatchCreateFlows { flows: args.decode_field("flows")? }),
        ),
        ToolSpec::new(
            "get_public_flow",
            "Get a publicly shared flow by ID.",
            ObjectSchema::strict().required("flow_id", FLOW_ID, "The ID of the public flow"),
            |args, _| Ok(Operation::GetPublicFlow { flow_id: args.text("flow_id")? }),
        ),
    ]
}
