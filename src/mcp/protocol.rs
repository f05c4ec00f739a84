/// Wire types for the MCP stdio channel
///
/// JSON-RPC 2.0 envelopes plus the handful of MCP payloads the habit store
/// sends. MCP uses camelCase field names on the wire.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// MCP revision the server speaks
pub const MCP_VERSION: &str = "2024-11-05";

pub const JSONRPC_VERSION: &str = "2.0";

/// Incoming request or notification
///
/// A message without an `id` member is a notification and never gets a
/// response. An explicit `"id": null` is still a request. The `jsonrpc`
/// marker is accepted but not checked.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// `Some` whenever the member exists, including `Some(Value::Null)`
fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Outgoing JSON-RPC 2.0 message, carrying either `result` or `error`
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(RpcFault),
}

#[derive(Debug, Serialize)]
pub struct RpcFault {
    pub code: i32,
    pub message: String,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Tool name (e.g., "habit_toggle")
    pub name: String,
    /// Tool arguments, deserialized later into the tool's own params type
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Default::default())
}

/// Result of a `tools/call` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

/// A text block shown to the client
#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// One entry of the `tools/list` response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Reply to `initialize`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: Value,
    pub server_info: Value,
}

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Result(result),
        }
    }

    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Error(RpcFault { code, message }),
        }
    }
}

impl ToolCallResult {
    pub fn success(text: String) -> Self {
        Self::text(text, false)
    }

    /// A failed tool call; the client sees the message with `isError: true`
    pub fn error(message: String) -> Self {
        Self::text(format!("Error: {}", message), true)
    }

    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent { kind: "text", text }],
            is_error,
        }
    }
}
