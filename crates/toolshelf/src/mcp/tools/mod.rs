mod catalog;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{Context, JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "toolshelf".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| {
        JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("Internal error: {e}"))
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "catalog_query".to_string(),
            description: "List approved tools matching a search, category, pricing model and tags, one page at a time. Search is case-insensitive over name and description; every listed tag must be present. Returns the page of records with total_count and total_pages.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "search": {
                        "type": "string",
                        "description": "Text matched against name and description (default: empty)"
                    },
                    "category": {
                        "type": "string",
                        "description": "Category label (e.g. 'AI Assistant', 'CRM') or 'all' (default: all)"
                    },
                    "pricing": {
                        "type": "string",
                        "description": "Pricing model label (e.g. 'Free', 'Open Source') or 'all' (default: all)"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Tags that must all be present (default: none)"
                    },
                    "page": {
                        "type": "number",
                        "description": "Page number, 1-indexed (default: 1)"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Tools per page (default: the server's page size)"
                    }
                }
            }),
        },
        Tool {
            name: "catalog_facets".to_string(),
            description: "List the distinct categories, pricing models and tags used by approved tools, for building filters.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        Tool {
            name: "catalog_submit".to_string(),
            description: "Add a tool to the catalog. It is approved immediately and appears first in listings. Name, url and description are required.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Display name" },
                    "url": { "type": "string", "description": "Homepage URL" },
                    "description": { "type": "string", "description": "What the tool does" },
                    "category": { "type": "string", "description": "Category label" },
                    "pricing_model": { "type": "string", "description": "Pricing model label" },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Free-form tags"
                    },
                    "image_url": { "type": "string", "description": "Preview image URL (optional)" },
                    "submitted_by_user_id": { "type": "string", "description": "Submitter (default: anonymous)" }
                },
                "required": ["name", "url", "description", "category", "pricing_model"]
            }),
        },
        Tool {
            name: "catalog_url_info".to_string(),
            description: "Derive a suggested name, description and preview image from a tool's URL. Nothing is fetched over the network.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the tool (e.g. https://www.example.com)"
                    }
                },
                "required": ["url"]
            }),
        },
    ];

    let result = ToolsList { tools };
    serde_json::to_value(result).map_err(|e| {
        JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("Internal error: {e}"))
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    context: &Context,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| {
            JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("Invalid params: {e}"))
        })?;

    match params.name.as_str() {
        "catalog_query" => catalog::handle_query(params.arguments, context).await,
        "catalog_facets" => catalog::handle_facets(context).await,
        "catalog_submit" => catalog::handle_submit(params.arguments, context).await,
        "catalog_url_info" => catalog::handle_url_info(params.arguments, context).await,
        _ => Err(JsonRpcError::new(
            JsonRpcError::INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}

/// Wrap a serializable payload as pretty JSON text content
fn text_result<T: Serialize>(payload: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(payload).map_err(|e| {
        JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("Serialization error: {e}"))
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| {
        JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("Internal error: {e}"))
    })
}

fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    // Tools whose arguments are all optional accept a missing object.
    let arguments = arguments.unwrap_or_else(|| serde_json::json!({}));
    serde_json::from_value(arguments).map_err(|e| {
        JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("Invalid arguments: {e}"))
    })
}
