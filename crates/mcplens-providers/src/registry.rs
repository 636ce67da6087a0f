use crate::scanner::DEFAULT_MAX_LINE_BYTES;
use crate::traits::LogParser;
use crate::{Result, RpcParser, StructuredParser};
use mcplens_core::{LogFormat, LogSource};
use mcplens_types::GatewayMetrics;

/// Knobs shared by every parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub max_line_bytes: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// Create the parser for a resolved log format
pub fn parser_for(format: LogFormat, options: ParserOptions) -> Box<dyn LogParser> {
    match format {
        LogFormat::Structured => Box::new(StructuredParser::new(options)),
        LogFormat::RawProtocol => Box::new(RpcParser::new(options)),
    }
}

/// Aggregate a resolved source with the matching parser
pub fn parse_source(source: &LogSource, options: ParserOptions) -> Result<GatewayMetrics> {
    parser_for(source.format, options).parse(&source.path)
}
