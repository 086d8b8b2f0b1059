mod mule;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

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

/// Schema shared by every version tool: no arguments.
fn empty_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "muletools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "get_mulesoft_runtime_versions".to_string(),
            description: "Scrape MuleSoft documentation for ALL EDGE and LTS runtime versions. Returns every version listed on the release cadence page, with its channel, numeric ordering key, and the text as published.".to_string(),
            input_schema: empty_schema(),
        },
        Tool {
            name: "get_latest_mulesoft_versions".to_string(),
            description: "Get ONLY the latest EDGE and LTS MuleSoft runtime versions from the release cadence page. A channel with no published version is omitted from the result.".to_string(),
            input_schema: empty_schema(),
        },
        Tool {
            name: "get_dataweave_versions".to_string(),
            description: "Scrape MuleSoft documentation for the DataWeave language compatibility matrix: which DataWeave versions each Mule runtime version supports, keyed by runtime version.".to_string(),
            input_schema: empty_schema(),
        },
        Tool {
            name: "get_connector_versions".to_string(),
            description: "Scrape MuleSoft documentation for Anypoint Connector compatibility: which Mule runtime versions each connector supports, keyed by connector name.".to_string(),
            input_schema: empty_schema(),
        },
        Tool {
            name: "get_java_support".to_string(),
            description: "Scrape MuleSoft documentation for the Java support matrix: which JDK major versions each Mule runtime version runs on.".to_string(),
            input_schema: empty_schema(),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "get_mulesoft_runtime_versions" => mule::handle_runtime_versions(global).await,
        "get_latest_mulesoft_versions" => mule::handle_latest_versions(global).await,
        "get_dataweave_versions" => mule::handle_dataweave_versions(global).await,
        "get_connector_versions" => mule::handle_connector_versions(global).await,
        "get_java_support" => mule::handle_java_support(global).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
