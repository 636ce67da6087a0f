use std::fmt;
use std::path::PathBuf;

/// Result type for mcplens-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal stream failures. Malformed lines never surface here.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed (open, read)
    Io(std::io::Error),

    /// A single line exceeded the configured maximum buffered size
    LineTooLong {
        path: PathBuf,
        line: usize,
        limit: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::LineTooLong { path, line, limit } => write!(
                f,
                "Line {} of {} exceeds the maximum line size of {} bytes",
                line,
                path.display(),
                limit
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::LineTooLong { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
