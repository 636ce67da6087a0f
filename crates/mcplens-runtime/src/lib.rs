pub mod config;
pub mod error;
pub mod services;

pub use config::{Config, ParserConfig};
pub use error::{Error, Result};
pub use services::{FailedRun, MultiRunReport, RunMetricsService, RunOutcome};
