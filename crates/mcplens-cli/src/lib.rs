// mcplens CLI
//
// Every command reads run directories offline; nothing is indexed or cached.
// Output goes to stdout as JSON, diagnostics go to stderr through tracing.

mod args;
mod commands;
mod handlers;
mod logging;

pub use args::{Cli, Commands};
pub use commands::run;
