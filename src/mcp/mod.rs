/// MCP protocol implementation
///
/// This module handles the Model Context Protocol communication: JSON-RPC
/// framing over a line-oriented stream and routing of tool calls.

pub mod protocol;
pub mod server;

pub use server::McpServer;
