mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Shared state for every request handled by a server instance
#[derive(Debug, Clone)]
pub struct Context {
    pub global: crate::Global,
    pub service: CatalogService,
}

pub async fn run(app: App, global: crate::Global, service: CatalogService) -> Result<()> {
    let context = Context { global, service };
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(context).await,
        cli::Commands::Sse(options) => sse::run_sse(options, context).await,
    }
}

pub async fn handle_request(request_str: &str, context: &Context) -> JsonRpcResponse {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(JsonRpcError::new(
                    JsonRpcError::PARSE_ERROR,
                    format!("Parse error: {e}"),
                )),
            };
        }
    };

    log::debug!("jsonrpc request: method={}", request.method);

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, context).await,
        method => Err(JsonRpcError::new(
            JsonRpcError::METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Context {
        Context {
            global: crate::Global {
                catalog: None,
                page_size: 9,
                verbose: false,
            },
            service: CatalogService::load(None).unwrap(),
        }
    }

    async fn call(context: &Context, request: serde_json::Value) -> serde_json::Value {
        let response = handle_request(&request.to_string(), context).await;
        serde_json::to_value(response).unwrap()
    }

    /// Decode the JSON text payload of a successful tools/call response
    fn payload(response: &serde_json::Value) -> serde_json::Value {
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = handle_request("{not json", &context()).await;
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let value = call(
            &context(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
        )
        .await;
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["id"], 1);
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let ctx = context();
        let init = call(&ctx, json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})).await;
        assert_eq!(init["result"]["serverInfo"]["name"], "toolshelf");

        let list = call(&ctx, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let names: Vec<&str> = list["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "catalog_query",
                "catalog_facets",
                "catalog_submit",
                "catalog_url_info"
            ]
        );
    }

    #[tokio::test]
    async fn test_query_tool_defaults() {
        let value = call(
            &context(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "catalog_query", "arguments": {"page": 2}}}),
        )
        .await;
        let body = payload(&value);
        assert_eq!(body["total_count"], 15);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["data"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_query_tool_filters() {
        let value = call(
            &context(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "catalog_query", "arguments": {
                       "search": "GEMINI", "category": "all", "pricing": "Freemium",
                       "tags": ["api"], "limit": 5}}}),
        )
        .await;
        let body = payload(&value);
        assert_eq!(body["total_count"], 1);
        assert_eq!(body["data"][0]["name"], "Gemini");
    }

    #[tokio::test]
    async fn test_query_tool_rejects_zero_limit() {
        let value = call(
            &context(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "catalog_query", "arguments": {"limit": 0}}}),
        )
        .await;
        assert_eq!(value["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_submit_then_query_sees_new_tool() {
        let ctx = context();
        let submitted = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
                   "params": {"name": "catalog_submit", "arguments": {
                       "name": "Raycast", "url": "https://raycast.com",
                       "description": "Blazingly fast launcher",
                       "category": "Productivity", "pricing_model": "Free",
                       "tags": ["mac"]}}}),
        )
        .await;
        let record = payload(&submitted);
        assert_eq!(record["status"], "approved");

        let listed = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call",
                   "params": {"name": "catalog_query", "arguments": {}}}),
        )
        .await;
        let body = payload(&listed);
        assert_eq!(body["total_count"], 16);
        assert_eq!(body["data"][0]["id"], record["id"]);
    }

    #[tokio::test]
    async fn test_submit_validation_error() {
        let ctx = context();
        let value = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call",
                   "params": {"name": "catalog_submit", "arguments": {
                       "name": "", "url": "https://x.io", "description": "d",
                       "category": "CRM", "pricing_model": "Paid"}}}),
        )
        .await;
        assert_eq!(value["error"]["code"], -32603);
        assert!(value["error"]["message"]
            .as_str()
            .unwrap()
            .contains("name"));
        assert_eq!(ctx.service.len().await, 15);
    }

    #[tokio::test]
    async fn test_url_info_tool() {
        let ctx = context();
        let ok = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call",
                   "params": {"name": "catalog_url_info",
                              "arguments": {"url": "https://www.example.com/page"}}}),
        )
        .await;
        assert_eq!(payload(&ok)["name"], "Example");

        let bad = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 10, "method": "tools/call",
                   "params": {"name": "catalog_url_info", "arguments": {"url": "not-a-url"}}}),
        )
        .await;
        assert_eq!(bad["error"]["code"], -32603);
    }

    #[tokio::test]
    async fn test_facets_tool() {
        let value = call(
            &context(),
            json!({"jsonrpc": "2.0", "id": 11, "method": "tools/call",
                   "params": {"name": "catalog_facets"}}),
        )
        .await;
        let body = payload(&value);
        assert_eq!(body["categories"].as_array().unwrap().len(), 9);
        assert_eq!(body["pricing_models"][0], "Free");
    }
}
