//! Line builders for both gateway log formats.
//!
//! Builders return one JSON object serialized as a single line so tests can
//! splice in malformed lines between them.

use serde_json::{Value, json};

/// Layout of a run directory, relative to the run root
pub const ROOT_GATEWAY: &str = "gateway.jsonl";
pub const MCP_LOGS_GATEWAY: &str = "mcp-logs/gateway.jsonl";
pub const MCP_LOGS_RPC: &str = "mcp-logs/rpc-messages.jsonl";
pub const ROOT_RPC: &str = "rpc-messages.jsonl";

/// A successful `tool_call` line in the structured format
pub fn tool_call(timestamp: &str, server: &str, tool: &str, duration_ms: f64) -> String {
    structured(json!({
        "timestamp": timestamp,
        "level": "info",
        "type": "gateway",
        "event": "tool_call",
        "server_name": server,
        "tool_name": tool,
        "method": "tools/call",
        "duration": duration_ms,
        "status": "success",
    }))
}

/// A failed `tool_call` line in the structured format
pub fn failed_tool_call(
    timestamp: &str,
    server: &str,
    tool: &str,
    duration_ms: f64,
    error: &str,
) -> String {
    structured(json!({
        "timestamp": timestamp,
        "level": "error",
        "type": "gateway",
        "event": "tool_call",
        "server_name": server,
        "tool_name": tool,
        "method": "tools/call",
        "duration": duration_ms,
        "status": "error",
        "error": error,
    }))
}

/// Serialize an arbitrary structured entry
pub fn structured(entry: Value) -> String {
    entry.to_string()
}

/// An outgoing `tools/call` request frame
pub fn rpc_request(timestamp: &str, server: &str, id: Value, tool: &str) -> String {
    json!({
        "timestamp": timestamp,
        "direction": "OUT",
        "type": "REQUEST",
        "server_id": server,
        "payload": {
            "jsonrpc": "2.0",
            "method": "tools/call",
            "id": id,
            "params": { "name": tool, "arguments": {} },
        },
    })
    .to_string()
}

/// An incoming successful response frame
pub fn rpc_response(timestamp: &str, server: &str, id: Value) -> String {
    json!({
        "timestamp": timestamp,
        "direction": "IN",
        "type": "RESPONSE",
        "server_id": server,
        "payload": {
            "jsonrpc": "2.0",
            "id": id,
            "result": { "content": [] },
        },
    })
    .to_string()
}

/// An incoming error response frame
pub fn rpc_error(timestamp: &str, server: &str, id: Value, code: i64, message: &str) -> String {
    json!({
        "timestamp": timestamp,
        "direction": "IN",
        "type": "RESPONSE",
        "server_id": server,
        "payload": {
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message },
        },
    })
    .to_string()
}
