// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Bounded JSONL line reader shared by both formats
pub mod scanner;

// Format implementations
pub mod rpc;
pub mod structured;

// Parser registry
pub mod registry;

pub use traits::LogParser;

pub use scanner::{DEFAULT_MAX_LINE_BYTES, ScanStats};

pub use rpc::{Correlator, RpcParser};
pub use structured::StructuredParser;

pub use registry::{ParserOptions, parse_source, parser_for};

pub use error::{Error, Result};
