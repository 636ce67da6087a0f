pub mod calls;
pub mod correlate;
pub mod parser;
pub mod schema;

use crate::registry::ParserOptions;
use crate::scanner::scan_json_lines;
use crate::traits::LogParser;
use crate::{Result, ScanStats};
use mcplens_core::LogFormat;
use mcplens_types::{GatewayMetrics, ToolCall};
use std::path::Path;

pub use self::calls::CallCollector;
pub use self::correlate::{Correlator, MessageKey};
pub use self::parser::{MetricsFolder, PendingRequest};
pub use self::schema::{Direction, Frame, MessageType, RpcError, RpcMessageEntry};

/// Parser for the canonical `rpc-messages.jsonl` format.
///
/// Tool calls are reconstructed by pairing each outgoing `tools/call`
/// request with the incoming response that carries the same
/// `(server_id, id)`.
pub struct RpcParser {
    options: ParserOptions,
}

impl RpcParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Default for RpcParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl LogParser for RpcParser {
    fn format(&self) -> LogFormat {
        LogFormat::RawProtocol
    }

    fn parse_with_stats(&self, path: &Path) -> Result<(GatewayMetrics, ScanStats)> {
        let mut folder = MetricsFolder::new();
        let stats = scan_json_lines::<RpcMessageEntry, _>(
            path,
            self.options.max_line_bytes,
            |stats, line, entry| folder.fold(stats, path, line, entry),
        )?;
        Ok((folder.finish(), stats))
    }

    fn extract_tool_calls(&self, path: &Path) -> Result<Vec<ToolCall>> {
        let mut collector = CallCollector::new();
        scan_json_lines::<RpcMessageEntry, _>(
            path,
            self.options.max_line_bytes,
            |stats, line, entry| collector.collect(stats, path, line, entry),
        )?;
        Ok(collector.finish())
    }
}
