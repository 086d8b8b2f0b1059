use crate::prelude::{eprintln, *};

use super::{CallToolResult, Content, JsonRpcError};
use crate::config::DocsConfig;
use crate::fetch::Fetcher;

pub async fn handle_runtime_versions(
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_mulesoft_runtime_versions");
    }

    let fetcher = Fetcher::new(DocsConfig::default());
    let data = crate::mule::runtime_versions_data(&fetcher)
        .await
        .map_err(tool_error)?;

    text_result(&data)
}

pub async fn handle_latest_versions(
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_latest_mulesoft_versions");
    }

    let fetcher = Fetcher::new(DocsConfig::default());
    let data = crate::mule::latest_versions_data(&fetcher)
        .await
        .map_err(tool_error)?;

    text_result(&data)
}

pub async fn handle_dataweave_versions(
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_dataweave_versions");
    }

    let fetcher = Fetcher::new(DocsConfig::default());
    let data = crate::mule::dataweave_versions_data(&fetcher)
        .await
        .map_err(tool_error)?;

    text_result(&data)
}

pub async fn handle_connector_versions(
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_connector_versions");
    }

    let fetcher = Fetcher::new(DocsConfig::default());
    let data = crate::mule::connector_versions_data(&fetcher)
        .await
        .map_err(tool_error)?;

    text_result(&data)
}

pub async fn handle_java_support(
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_java_support");
    }

    let fetcher = Fetcher::new(DocsConfig::default());
    let data = crate::mule::java_support_data(&fetcher)
        .await
        .map_err(tool_error)?;

    text_result(&data)
}

/// A failed fetch or parse surfaces as a single structured error; no tool
/// returns a partial result.
fn tool_error(err: Error) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Tool execution error: {err}"),
        data: None,
    }
}

/// Serialize the façade result as a pretty-printed text content block.
fn text_result<T: serde::Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}
