// crates/langflow-mcp/src/registry/store.rs
// ============================================================================
// Module: Store Tools
// Description: Langflow component store and custom component endpoints.
// Purpose: Declare store tool schemas and their remote operations.
// Dependencies: none
// ============================================================================

use super::ToolSpec;
use super::no_arguments;
use crate::operation::Operation;
use crate::operation::Sensitive;
use crate::schema::ObjectSchema;
use crate::schema::Rule;

/// Store and custom component tools.
pub(super) fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "check_store",
            "Check whether the Langflow component store is enabled.",
            no_arguments(),
            |_, _| Ok(Operation::CheckStore),
        ),
        ToolSpec::new(
            "check_store_api_key",
            "Check a component store API key.",
            ObjectSchema::strict().required(
                "api_key",
                Rule::required_text("API key is required"),
                "Store API key",
            ),
            |args, _| {
                Ok(Operation::CheckStoreApiKey { api_key: Sensitive::new(args.text("api_key")?) })
            },
        ),
        ToolSpec::new(
            "list_store_components",
            "List component store entries with optional paging, tags, and search.",
            ObjectSchema::strict()
                .optional("page", Rule::page(), "Page number for pagination")
                .optional(
                    "limit",
                    Rule::page_size("Limit cannot exceed 100"),
                    "Number of components per page (max 100)",
                )
                .optional("tags", Rule::list(Rule::text()), "Tag filter")
                .optional("search", Rule::text(), "Free-text search"),
            |args, _| Ok(Operation::ListStoreComponents(args.decode()?)),
        ),
        ToolSpec::new(
            "get_store_component",
            "Get a component store entry by ID.",
            ObjectSchema::strict().required(
                "component_id",
                Rule::required_text("Component ID is required"),
                "Store component ID",
            ),
            |args, _| {
                Ok(Operation::GetStoreComponent { component_id: args.text("component_id")? })
            },
        ),
        ToolSpec::new(
            "list_store_tags",
            "List the tags used by the component store.",
            no_arguments(),
            |_, _| Ok(Operation::ListStoreTags),
        ),
        ToolSpec::new(
            "get_user_likes",
            "List the store components liked by the current user.",
            no_arguments(),
            |_, _| Ok(Operation::GetUserLikes),
        ),
        ToolSpec::new(
            "list_custom_components",
            "List custom components.",
            no_arguments(),
            |_, _| Ok(Operation::ListCustomComponents),
        ),
        ToolSpec::new(
            "create_custom_component",
            "Create a custom component from source code.",
            ObjectSchema::strict()
                .required("code", Rule::required_text("Component code is required"), "Source code")
                .required(
                    "name",
                    Rule::name("Component name is required", "Component name too long"),
                    "Component name",
                )
                .optional("description", Rule::text(), "Component description")
                .optional("return_type", Rule::text(), "Declared return type"),
            |args, _| Ok(Operation::CreateCustomComponent(args.decode()?)),
        ),
    ]
}
