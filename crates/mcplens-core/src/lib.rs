mod error;
pub mod path;
pub mod source;

pub use error::{Error, Result};
pub use path::{expand_tilde, normalize_path, resolve_workspace_path};
pub use source::{LogFormat, LogSource, discover_run_dirs, resolve_log_source};
