use chrono::{DateTime, Utc};
use mcplens_types::parse_timestamp;
use serde::Deserialize;

/// One line of `gateway.jsonl`. Every field is optional on the wire.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    /// Milliseconds, already measured by the gateway
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub input_size: Option<u64>,
    #[serde(default)]
    pub output_size: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The `event` field, reduced to what the aggregator cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Request,
    ToolCall,
    RpcCall,
    Other,
}

impl EventKind {
    pub fn from_event(event: &str) -> Self {
        match event {
            "request" => EventKind::Request,
            "tool_call" => EventKind::ToolCall,
            "rpc_call" => EventKind::RpcCall,
            _ => EventKind::Other,
        }
    }

    /// Whether entries of this kind count as a request
    pub fn is_call(&self) -> bool {
        !matches!(self, EventKind::Other)
    }
}

impl LogEntry {
    pub fn event_kind(&self) -> EventKind {
        self.event
            .as_deref()
            .map(EventKind::from_event)
            .unwrap_or(EventKind::Other)
    }

    pub fn server_name(&self) -> Option<&str> {
        non_empty(&self.server_name)
    }

    pub fn tool_name(&self) -> Option<&str> {
        non_empty(&self.tool_name)
    }

    pub fn method(&self) -> Option<&str> {
        non_empty(&self.method)
    }

    pub fn error_message(&self) -> Option<&str> {
        non_empty(&self.error)
    }

    /// Name the call is aggregated under: tool name, else method
    pub fn call_name(&self) -> Option<&str> {
        self.tool_name().or_else(|| self.method())
    }

    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error") || self.error_message().is_some()
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Duration if the gateway measured a positive one
    pub fn positive_duration(&self) -> Option<f64> {
        self.duration.filter(|d| *d > 0.0)
    }

    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn has_timestamp(&self) -> bool {
        non_empty(&self.timestamp).is_some()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
