use crate::services::FailedRun;
use std::fmt;
use std::path::PathBuf;

/// Result type for mcplens-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Parser layer error (stream failure while reading a log)
    Provider(mcplens_providers::Error),

    /// Core layer error (path resolution, directory traversal)
    Core(mcplens_core::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// No recognized gateway log in the run directory
    NotFound(PathBuf),

    /// Every run in a multi-run aggregation lacked a usable log
    NoContributingRuns,

    /// Logs were found but none of them could be read to the end
    AllRunsFailed(Vec<FailedRun>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Provider(err) => write!(f, "Provider error: {}", err),
            Error::Core(err) => write!(f, "Core error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotFound(dir) => write!(f, "No MCP gateway log found in {}", dir.display()),
            Error::NoContributingRuns => write!(f, "No run contained an MCP gateway log"),
            Error::AllRunsFailed(failed) => {
                write!(f, "All {} runs with a gateway log failed to parse", failed.len())?;
                for run in failed {
                    write!(f, "\n  {}: {}", run.dir.display(), run.error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_)
            | Error::NotFound(_)
            | Error::NoContributingRuns
            | Error::AllRunsFailed(_) => None,
        }
    }
}

impl From<mcplens_providers::Error> for Error {
    fn from(err: mcplens_providers::Error) -> Self {
        Error::Provider(err)
    }
}

impl From<mcplens_core::Error> for Error {
    fn from(err: mcplens_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
