use chrono::{DateTime, Utc};
use mcplens_types::parse_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC method whose requests are tool invocations
pub const TOOLS_CALL_METHOD: &str = "tools/call";

/// One line of `rpc-messages.jsonl`. The payload stays opaque until the
/// direction/type pair says which shape to decode it as.
#[derive(Debug, Deserialize, Clone)]
pub struct RpcMessageEntry {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub server_id: Option<String>,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Gateway to server
    Out,
    /// Server to gateway
    In,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Request,
    Response,
    #[default]
    #[serde(other)]
    Other,
}

// --- Per-branch payload shapes ---

#[derive(Debug, Deserialize)]
struct RequestPayload {
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ResponsePayload {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn display_message(&self) -> String {
        match (&self.message, self.code) {
            (Some(message), _) if !message.is_empty() => message.clone(),
            (_, Some(code)) => format!("error code {}", code),
            _ => "unknown error".to_string(),
        }
    }
}

/// An outgoing `tools/call` request
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub server_id: String,
    /// Canonical JSON text of the request id, if any
    pub id: Option<String>,
    pub tool_name: String,
    pub timestamp: Option<String>,
    pub input_size: Option<u64>,
}

/// An incoming response to any request
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub server_id: String,
    pub id: Option<String>,
    pub error: Option<RpcError>,
    pub timestamp: Option<String>,
    pub output_size: Option<u64>,
}

/// What a raw line means to the correlation logic
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    ToolCall(ToolCallRequest),
    Response(RpcResponse),
    /// A frame this engine has no use for (other methods, notifications)
    Ignored,
    /// Envelope decoded but the payload did not match its declared type
    Malformed(String),
}

/// Server key used when a line carries no `server_id`
pub const UNKNOWN_SERVER_ID: &str = "unknown";

impl RpcMessageEntry {
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.as_deref().is_some_and(|ts| !ts.is_empty())
    }

    fn server_key(&self) -> String {
        match self.server_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => UNKNOWN_SERVER_ID.to_string(),
        }
    }

    /// Discriminate on direction/type, then decode only the matching payload shape
    pub fn into_frame(self) -> Frame {
        match (self.direction, self.message_type) {
            (Direction::Out, MessageType::Request) => self.into_request_frame(),
            (Direction::In, MessageType::Response) => self.into_response_frame(),
            _ => Frame::Ignored,
        }
    }

    fn into_request_frame(self) -> Frame {
        let server_id = self.server_key();
        let request: RequestPayload = match serde_json::from_value(self.payload) {
            Ok(request) => request,
            Err(err) => return Frame::Malformed(format!("request payload: {}", err)),
        };
        if request.method.as_deref() != Some(TOOLS_CALL_METHOD) {
            return Frame::Ignored;
        }

        let params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(params) => params,
                Err(err) => return Frame::Malformed(format!("tools/call params: {}", err)),
            },
            None => return Frame::Ignored,
        };
        let Some(tool_name) = params.name.filter(|name| !name.is_empty()) else {
            return Frame::Ignored;
        };

        Frame::ToolCall(ToolCallRequest {
            server_id,
            id: request.id.as_ref().map(canonical_id),
            tool_name,
            timestamp: self.timestamp,
            input_size: params.arguments.as_ref().and_then(json_size),
        })
    }

    fn into_response_frame(self) -> Frame {
        let server_id = self.server_key();
        let response: ResponsePayload = match serde_json::from_value(self.payload) {
            Ok(response) => response,
            Err(err) => return Frame::Malformed(format!("response payload: {}", err)),
        };

        let output_size = match (&response.result, &response.error) {
            (Some(result), _) => json_size(result),
            (None, Some(err)) => serde_json::to_vec(err).ok().map(|b| b.len() as u64),
            (None, None) => None,
        };

        Frame::Response(RpcResponse {
            server_id,
            id: response.id.as_ref().map(canonical_id),
            error: response.error,
            timestamp: self.timestamp,
            output_size,
        })
    }
}

/// JSON-RPC ids may be numbers or strings; key on the JSON text so `1` and `"1"` stay distinct
fn canonical_id(id: &Value) -> String {
    id.to_string()
}

fn json_size(value: &Value) -> Option<u64> {
    serde_json::to_vec(value).ok().map(|bytes| bytes.len() as u64)
}
