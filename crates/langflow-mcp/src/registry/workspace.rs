// crates/langflow-mcp/src/registry/workspace.rs
// ============================================================================
// Module: Workspace Tools
// Description: Folder, project, and global variable management.
// Purpose: Declare workspace tool schemas and their remote operations.
// Dependencies: none
// ============================================================================

use super::FOLDER_ID;
use super::PAGE_SIZE;
use super::ToolSpec;
use super::base64_upload;
use super::inline_file_rule;
use super::inline_upload;
use crate::operation::Operation;
use crate::schema::EMPTY_UPDATE_MESSAGE;
use crate::schema::ObjectSchema;
use crate::schema::Rule;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Folder name rule.
const FOLDER_NAME: Rule = Rule::name("Folder name is required", "Folder name too long");

/// Parent folder identifier.
const PARENT_ID: Rule = Rule::uuid("Invalid parent folder ID format");

/// Project identifier.
const PROJECT_ID: Rule = Rule::uuid("Invalid project ID format");

/// Project name rule.
const PROJECT_NAME: Rule = Rule::name("Project name is required", "Project name too long");

/// Variable identifier.
const VARIABLE_ID: Rule = Rule::uuid("Invalid variable ID format");

/// Variable name rule.
const VARIABLE_NAME: Rule = Rule::name("Variable name is required", "Variable name too long");

/// Page and size fields.
fn paged() -> ObjectSchema {
    ObjectSchema::strict()
        .optional("page", Rule::page(), "Page number for pagination")
        .optional("size", PAGE_SIZE, "Number of items per page (max 100)")
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Folder, project, and variable tools.
#[allow(clippy::too_many_lines, reason = "Flat tool catalog.")]
pub(super) fn specs(max_file_bytes: usize) -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("list_folders", "List folders with optional pagination.", paged(), |args, _| {
            Ok(Operation::ListFolders(args.decode()?))
        }),
        ToolSpec::new(
            "create_folder",
            "Create a folder, optionally nested under a parent folder.",
            ObjectSchema::strict()
                .required("name", FOLDER_NAME, "Folder name")
                .optional("description", Rule::text(), "Folder description")
                .optional("parent_id", PARENT_ID, "Parent folder ID"),
            |args, _| Ok(Operation::CreateFolder(args.decode()?)),
        ),
        ToolSpec::new(
            "get_folder",
            "Get a folder and its contents by ID.",
            ObjectSchema::strict().required("folder_id", FOLDER_ID, "Folder ID"),
            |args, _| Ok(Operation::GetFolder { folder_id: args.text("folder_id")? }),
        ),
        ToolSpec::new(
            "update_folder",
            "Update a folder. Pass folder_id and at least one field to change.",
            ObjectSchema::strict()
                .required("folder_id", FOLDER_ID, "Folder ID")
                .optional("name", FOLDER_NAME, "New folder name")
                .optional("description", Rule::text(), "New folder description")
                .optional("parent_id", PARENT_ID, "New parent folder ID")
                .at_least_one_of(&["name", "description", "parent_id"], EMPTY_UPDATE_MESSAGE),
            |args, _| {
                Ok(Operation::UpdateFolder {
                    folder_id: args.text("folder_id")?,
                    update: args.decode()?,
                })
            },
        ),
        ToolSpec::new(
            "delete_folder",
            "Delete a folder by ID.",
            ObjectSchema::strict().required("folder_id", FOLDER_ID, "Folder ID"),
            |args, _| Ok(Operation::DeleteFolder { folder_id: args.text("folder_id")? }),
        )
        .acknowledged("Folder deleted successfully"),
        ToolSpec::new(
            "download_folder",
            "Download a folder as a zip archive, returned base64-encoded.",
            ObjectSchema::strict().required("folder_id", FOLDER_ID, "Folder ID"),
            |args, _| Ok(Operation::DownloadFolder { folder_id: args.text("folder_id")? }),
        ),
        ToolSpec::new(
            "upload_folder",
            "Upload a folder archive from base64 content.",
            ObjectSchema::strict()
                .required(
                    "file_content",
                    Rule::payload("File content is required", max_file_bytes),
                    "Base64-encoded archive",
                )
                .required("file_name", Rule::file_name(), "Archive file name"),
            |args, guard| Ok(Operation::UploadFolder(base64_upload(&args, guard)?)),
        ),
        ToolSpec::new(
            "list_projects",
            "List projects with optional pagination.",
            paged(),
            |args, _| Ok(Operation::ListProjects(args.decode()?)),
        ),
        ToolSpec::new(
            "create_project",
            "Create a project.",
            ObjectSchema::strict()
                .required("name", PROJECT_NAME, "Project name")
                .optional("description", Rule::text(), "Project description"),
            |args, _| Ok(Operation::CreateProject(args.decode()?)),
        ),
        ToolSpec::new(
            "get_project",
            "Get a project by ID.",
            ObjectSchema::strict().required("project_id", PROJECT_ID, "Project ID"),
            |args, _| Ok(Operation::GetProject { project_id: args.text("project_id")? }),
        ),
        ToolSpec::new(
            "update_project",
            "Update a project. Pass project_id and at least one field to change.",
            ObjectSchema::strict()
                .required("project_id", PROJECT_ID, "Project ID")
                .optional("name", PROJECT_NAME, "New project name")
                .optional("description", Rule::text(), "New project description")
                .at_least_one_of(&["name", "description"], EMPTY_UPDATE_MESSAGE),
            |args, _| {
                Ok(Operation::UpdateProject {
                    project_id: args.text("project_id")?,
                    update: args.decode()?,
                })
            },
        ),
        ToolSpec::new(
            "delete_project",
            "Delete a project by ID.",
            ObjectSchema::strict().required("project_id", PROJECT_ID, "Project ID"),
            |args, _| Ok(Operation::DeleteProject { project_id: args.text("project_id")? }),
        )
        .acknowledged("Project deleted successfully"),
        ToolSpec::new(
            "upload_project",
            "Upload a project export file.",
            ObjectSchema::strict().required(
                "file",
                inline_file_rule(max_file_bytes),
                "Project file",
            ),
            |args, guard| Ok(Operation::UploadProject(inline_upload(&args, guard)?)),
        ),
        ToolSpec::new(
            "download_project",
            "Download a project export.",
            ObjectSchema::strict().required("project_id", PROJECT_ID, "Project ID"),
            |args, _| Ok(Operation::DownloadProject { project_id: args.text("project_id")? }),
        ),
        ToolSpec::new(
            "list_variables",
            "List global variables.",
            ObjectSchema::strict(),
            |_, _| Ok(Operation::ListVariables),
        ),
        ToolSpec::new(
            "create_variable",
            "Create a global variable such as a credential.",
            ObjectSchema::strict()
                .required("name", VARIABLE_NAME, "Variable name")
                .required("value", Rule::required_text("Variable value is required"), "Value")
                .optional("type", Rule::text(), "Variable type, e.g. Credential or Generic")
                .optional("default_fields", Rule::list(Rule::text()), "Component fields to fill"),
            |args, _| Ok(Operation::CreateVariable(args.decode()?)),
        ),
        ToolSpec::new(
            "update_variable",
            "Update a global variable. Pass variable_id and at least one field to change.",
            ObjectSchema::strict()
                .required("variable_id", VARIABLE_ID, "Variable ID")
                .optional("name", VARIABLE_NAME, "New variable name")
                .optional("value", Rule::text(), "New value")
                .optional("type", Rule::text(), "New variable type")
                .at_least_one_of(&["name", "value", "type"], EMPTY_UPDATE_MESSAGE),
            |args, _| {
                Ok(Operation::UpdateVariable {
                    variable_id: args.text("variable_id")?,
                    update: args.decode()?,
                })
            },
        ),
        ToolSpec::new(
            "delete_variable",
            "Delete a global variable by ID.",
            ObjectSchema::strict().required("variable_id", VARIABLE_ID, "Variable ID"),
            |args, _| Ok(Operation::DeleteVariable { variable_id: args.text("variable_id")? }),
        )
        .acknowledged("Variable deleted successfully"),
    ]
}
