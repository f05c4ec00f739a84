/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the MCP server that:
/// 1. Reads newline-delimited JSON-RPC messages from a reader (stdin in production)
/// 2. Routes tool calls to the habit tracker
/// 3. Writes one JSON-RPC response per request to a writer (stdout in production)

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HabitTrackerServer, ServerError};

/// MCP server that owns the habit tracker for the lifetime of the session
pub struct McpServer {
    habit_tracker: HabitTrackerServer,
    initialized: bool,
}

impl McpServer {
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    /// Serve requests from `reader` until it reaches end of input
    pub async fn run_with<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut line = String::new();
        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        self.handle_request(request)
    }

    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => to_response(id, &ToolList { tools: tool_definitions() }),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP session initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION,
            capabilities: json!({ "tools": { "listChanged": false } }),
            server_info: json!({
                "name": "habit-store",
                "version": env!("CARGO_PKG_VERSION"),
            }),
        };

        to_response(id, &result)
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                );
            }
        };

        if !self.initialized {
            debug!("Tool '{}' called before the initialized notification", tool_params.name);
        }

        let result = match self.call_tool(&tool_params.name, tool_params.arguments) {
            Ok(text) => ToolCallResult::success(text),
            Err(message) => {
                warn!("Tool '{}' failed: {}", tool_params.name, message);
                ToolCallResult::error(message)
            }
        };

        to_response(id, &result)
    }

    /// Run one tool and produce the text shown to the client
    fn call_tool(&mut self, name: &str, args: Value) -> Result<String, String> {
        let server = &mut self.habit_tracker;

        match name {
            "habit_create" => {
                let response = tools::create_habit(server, parse_args(args)?).map_err(fail)?;
                Ok(match response.habit_id {
                    Some(habit_id) => format!("{}\nHabit ID: {}", response.message, habit_id),
                    None => response.message,
                })
            }
            "habit_rename" => Ok(tools::rename_habit(server, parse_args(args)?).map_err(fail)?.message),
            "habit_archive" => Ok(tools::archive_habit(server, parse_args(args)?).map_err(fail)?.message),
            "habit_toggle" => Ok(tools::toggle_habit(server, parse_args(args)?).map_err(fail)?.message),
            "habit_list" => Ok(tools::list_habits(server, parse_args(args)?).map_err(fail)?.render()),
            "habit_status" => Ok(tools::get_day_status(server, parse_args(args)?).map_err(fail)?.message),
            "habit_calendar" => Ok(tools::get_calendar(server, parse_args(args)?).map_err(fail)?.message),
            "habit_history" => Ok(tools::get_history(server, parse_args(args)?).map_err(fail)?.message),
            "data_export" => tools::export_data(server).map_err(fail),
            "data_import" => Ok(tools::import_data(server, parse_args(args)?).map_err(fail)?.message),
            "data_reset" => Ok(tools::reset_data(server, parse_args(args)?).map_err(fail)?.message),
            _ => Err(format!("Unknown tool: {}", name)),
        }
    }
}

#[derive(Serialize)]
struct ToolList {
    tools: Vec<ToolDefinition>,
}

/// Every tool the server offers, with schemas derived from the params types
fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::CreateHabitParams>("habit_create", "Create a new habit to track"),
        tool::<tools::RenameHabitParams>("habit_rename", "Rename a habit; its history follows the new name"),
        tool::<tools::ArchiveHabitParams>(
            "habit_archive",
            "Archive a habit. It disappears from the checklist but its history and points stay (requires confirm: true)",
        ),
        tool::<tools::ToggleHabitParams>(
            "habit_toggle",
            "Mark a habit done for a day, or undo it if it was already done",
        ),
        tool::<tools::ListHabitsParams>("habit_list", "List habits with streaks and completion totals"),
        tool::<tools::StatusParams>("habit_status", "Show a day's checklist, completion ratio and points"),
        tool::<tools::CalendarParams>("habit_calendar", "Show a month as a completion calendar"),
        tool::<tools::HistoryParams>("habit_history", "List past days with the habits completed on each"),
        ToolDefinition {
            name: "data_export",
            description: "Export all habits, history and points as JSON",
            input_schema: json!({"type": "object", "properties": {}}),
        },
        tool::<tools::ImportParams>(
            "data_import",
            "Replace all data with an exported JSON snapshot (requires confirm: true)",
        ),
        tool::<tools::ResetParams>("data_reset", "Delete all habits and history (requires confirm: true)"),
    ]
}

fn tool<P: JsonSchema>(name: &'static str, description: &'static str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schemars::schema_for!(P))
        .unwrap_or_else(|_| json!({"type": "object"}));

    ToolDefinition {
        name,
        description,
        input_schema,
    }
}

fn parse_args<P: DeserializeOwned>(args: Value) -> Result<P, String> {
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))
}

fn fail(e: ServerError) -> String {
    e.to_string()
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
