// crates/langflow-mcp/src/registry/execution.rs
// ============================================================================
// Module: Execution Tools
// Description: Builds, vertices, code validation, and legacy run endpoints.
// Purpose: Declare execution tool schemas and their remote operations.
// Dependencies: serde_json
// ============================================================================

use serde_json::json;

use super::FLOW_ID;
use super::ToolSpec;
use crate::operation::EVENT_DELIVERY_VALUES;
use crate::operation::Operation;
use crate::schema::ObjectSchema;
use crate::schema::Rule;

/// Build job identifier.
const JOB_ID: Rule = Rule::required_text("Job ID is required");

/// Event delivery selector defaulting to polling.
fn with_event_delivery(schema: ObjectSchema) -> ObjectSchema {
    schema.defaulted(
        "event_delivery",
        Rule::choice(EVENT_DELIVERY_VALUES),
        json!("polling"),
        "Event delivery mode",
    )
}

/// Inputs-and-tweaks schema of the legacy run endpoints.
fn legacy_run() -> ObjectSchema {
    ObjectSchema::strict()
        .required("flow_id", FLOW_ID, "The ID of the flow to run")
        .optional("inputs", Rule::record(), "Flow inputs")
        .optional("tweaks", Rule::record(), "Per-component overrides")
}

/// Build, vertex, validation, and legacy tools.
#[allow(clippy::too_many_lines, reason = "Flat tool catalog.")]
pub(super) fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "build_flow",
            "Start a flow build and return the build job.",
            with_event_delivery(
                ObjectSchema::strict()
                    .required("flow_id", FLOW_ID, "The ID of the flow to build")
                    .optional("inputs", Rule::record(), "Build inputs")
                    .optional("data", Rule::record(), "Flow graph override")
                    .optional("files", Rule::list(Rule::text()), "Uploaded file paths")
                    .optional("stop_component_id", Rule::text(), "Stop at this component")
                    .optional("start_component_id", Rule::text(), "Start from this component")
                    .defaulted("log_builds", Rule::boolean(), json!(true), "Persist build logs")
                    .optional("flow_name", Rule::text(), "Flow name override"),
            ),
            |args, _| {
                Ok(Operation::BuildFlow {
                    flow_id: args.text("flow_id")?,
                    body: args.decode()?,
                    query: args.decode()?,
                })
            },
        ),
        ToolSpec::new(
            "get_build_status",
            "Get events and status for a build job.",
            with_event_delivery(ObjectSchema::strict().required("job_id", JOB_ID, "Build job ID")),
            |args, _| {
                Ok(Operation::GetBuildStatus {
                    job_id: args.text("job_id")?,
                    event_delivery: args.decode_field("event_delivery")?,
                })
            },
        ),
        ToolSpec::new(
            "cancel_build",
            "Cancel a running build job.",
            ObjectSchema::strict().required("job_id", JOB_ID, "Build job ID"),
            |args, _| Ok(Operation::CancelBuild { job_id: args.text("job_id")? }),
        ),
        ToolSpec::new(
            "build_vertices",
            "Compute the vertex build order for a flow.",
            ObjectSchema::strict()
                .required("flow_id", FLOW_ID, "The ID of the flow")
                .optional("data", Rule::record(), "Flow graph override")
                .optional("stop_component_id", Rule::text(), "Stop at this component")
                .optional("start_component_id", Rule::text(), "Start from this component"),
            |args, _| {
                Ok(Operation::BuildVertices { flow_id: args.text("flow_id")?, request: args.decode()? })
            },
        ),
        ToolSpec::new(
            "get_vertex",
            "Get a built vertex of a flow.",
            ObjectSchema::strict()
                .required("flow_id", FLOW_ID, "The ID of the flow")
                .required("vertex_id", Rule::required_text("Vertex ID is required"), "Vertex ID"),
            |args, _| {
                Ok(Operation::GetVertex {
                    flow_id: args.text("flow_id")?,
                    vertex_id: args.text("vertex_id")?,
                })
            },
        ),
        ToolSpec::new(
            "stream_vertex_build",
            "Stream the build output of one vertex of a flow.",
            ObjectSchema::strict()
                .required("flow_id", FLOW_ID, "The ID of the flow")
                .required("vertex_id", Rule::required_text("Vertex ID is required"), "Vertex ID"),
            |args, _| {
                Ok(Operation::StreamVertexBuild {
                    flow_id: args.text("flow_id")?,
                    vertex_id: args.text("vertex_id")?,
                })
            },
        ),
        ToolSpec::new(
            "validate_code",
            "Validate custom component source code.",
            ObjectSchema::strict().required("code", Rule::required_text("Code is required"), "Code"),
            |args, _| Ok(Operation::ValidateCode { code: args.text("code")? }),
        ),
        ToolSpec::new(
            "validate_prompt",
            "Validate a prompt template and list its variables.",
            ObjectSchema::strict().required(
                "prompt",
                Rule::required_text("Prompt is required"),
                "Prompt template",
            ),
            |args, _| Ok(Operation::ValidatePrompt { prompt: args.text("prompt")? }),
        ),
        ToolSpec::new(
            "process_flow",
            "Process a flow with inputs and tweaks. Use run_flow instead.",
            legacy_run(),
            |args, _| {
                Ok(Operation::ProcessFlow { flow_id: args.text("flow_id")?, request: args.decode()? })
            },
        )
        .deprecated(),
        ToolSpec::new(
            "predict_flow",
            "Predict with a flow using inputs and tweaks. Use run_flow instead.",
            legacy_run(),
            |args, _| {
                Ok(Operation::PredictFlow { flow_id: args.text("flow_id")?, request: args.decode()? })
            },
        )
        .deprecated(),
    ]
}
