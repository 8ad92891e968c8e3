// crates/langflow-mcp/src/registry/storage.rs
// ============================================================================
// Module: Storage Tools
// Description: Knowledge bases, per-flow file storage, and profile pictures.
// Purpose: Declare storage tool schemas and their remote operations.
// Dependencies: none
// ============================================================================

use super::FLOW_ID;
use super::ToolSpec;
use super::base64_upload;
use super::no_arguments;
use crate::operation::Operation;
use crate::schema::ObjectSchema;
use crate::schema::Rule;

/// Knowledge base name rule.
const KB_NAME: Rule = Rule::required_text("Knowledge base name is required");

/// Flow and file name pair.
fn flow_file() -> ObjectSchema {
    ObjectSchema::strict()
        .required("flow_id", FLOW_ID, "Owning flow ID")
        .required("file_name", Rule::file_name(), "Stored file name")
}

/// Base64 content and file name pair appended to `schema`.
fn with_upload(schema: ObjectSchema, max_file_bytes: usize) -> ObjectSchema {
    schema
        .required(
            "file_content",
            Rule::payload("File content is required", max_file_bytes),
            "Base64-encoded file content",
        )
        .required("file_name", Rule::file_name(), "File name")
}

/// Knowledge base, file, and profile picture tools.
#[allow(clippy::too_many_lines, reason = "Flat tool catalog.")]
pub(super) fn specs(max_file_bytes: usize) -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_knowledge_bases",
            "List knowledge bases.",
            ObjectSchema::strict(),
            |_, _| Ok(Operation::ListKnowledgeBases),
        ),
        ToolSpec::new(
            "get_knowledge_base",
            "Get a knowledge base by name.",
            ObjectSchema::strict().required("kb_name", KB_NAME, "Knowledge base name"),
            |args, _| Ok(Operation::GetKnowledgeBase { kb_name: args.text("kb_name")? }),
        ),
        ToolSpec::new(
            "delete_knowledge_base",
            "Delete a knowledge base by name.",
            ObjectSchema::strict().required("kb_name", KB_NAME, "Knowledge base name"),
            |args, _| Ok(Operation::DeleteKnowledgeBase { kb_name: args.text("kb_name")? }),
        )
        .acknowledged("Knowledge base deleted successfully"),
        ToolSpec::new(
            "bulk_delete_knowledge_bases",
            "Delete several knowledge bases by name.",
            ObjectSchema::strict().required(
                "kb_names",
                Rule::non_empty_list(
                    Rule::required_text("Knowledge base name cannot be empty"),
                    "At least one knowledge base name is required",
                ),
                "Knowledge base names",
            ),
            |args, _| {
                Ok(Operation::BulkDeleteKnowledgeBases { kb_names: args.text_list("kb_names")? })
            },
        ),
        ToolSpec::new(
            "upload_knowledge_base",
            "Upload a document into a knowledge base from base64 content.",
            with_upload(
                ObjectSchema::strict().required("kb_name", KB_NAME, "Knowledge base name"),
                max_file_bytes,
            ),
            |args, guard| {
                Ok(Operation::UploadKnowledgeBase {
                    kb_name: args.text("kb_name")?,
                    upload: base64_upload(&args, guard)?,
                })
            },
        ),
        ToolSpec::new(
            "upload_file",
            "Upload a file to a flow from base64 content.",
            with_upload(
                ObjectSchema::strict().required("flow_id", FLOW_ID, "Owning flow ID"),
                max_file_bytes,
            ),
            |args, guard| {
                Ok(Operation::UploadFile {
                    flow_id: args.text("flow_id")?,
                    upload: base64_upload(&args, guard)?,
                })
            },
        ),
        ToolSpec::new(
            "download_file",
            "Download a flow file, returned base64-encoded.",
            flow_file(),
            |args, _| {
                Ok(Operation::DownloadFile {
                    flow_id: args.text("flow_id")?,
                    file_name: args.text("file_name")?,
                })
            },
        ),
        ToolSpec::new(
            "list_files",
            "List files stored for a flow.",
            ObjectSchema::strict().required("flow_id", FLOW_ID, "Owning flow ID"),
            |args, _| Ok(Operation::ListFiles { flow_id: args.text("flow_id")? }),
        ),
        ToolSpec::new("delete_file", "Delete a flow file.", flow_file(), |args, _| {
            Ok(Operation::DeleteFile {
                flow_id: args.text("flow_id")?,
                file_name: args.text("file_name")?,
            })
        })
        .acknowledged("File deleted successfully"),
        ToolSpec::new(
            "get_file_image",
            "Get an image stored for a flow, returned base64-encoded.",
            flow_file(),
            |args, _| {
                Ok(Operation::GetFileImage {
                    flow_id: args.text("flow_id")?,
                    file_name: args.text("file_name")?,
                })
            },
        ),
        ToolSpec::new(
            "list_profile_pictures",
            "List the available profile pictures.",
            no_arguments(),
            |_, _| Ok(Operation::ListProfilePictures),
        ),
        ToolSpec::new(
            "get_profile_picture",
            "Get a profile picture, returned base64-encoded.",
            ObjectSchema::strict()
                .required("folder_name", Rule::file_name(), "Picture folder")
                .required("file_name", Rule::file_name(), "Picture file name"),
            |args, _| {
                Ok(Operation::GetProfilePicture {
                    folder_name: args.text("folder_name")?,
                    file_name: args.text("file_name")?,
                })
            },
        ),
    ]
}
