use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mcplens")]
#[command(about = "Usage metrics from MCP gateway logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $MCPLENS_PATH/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Single-line JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate metrics for one run, or merged metrics across several
    Metrics {
        /// Run directories
        dirs: Vec<PathBuf>,

        /// Also include every run directory found under this root
        #[arg(long)]
        scan: Option<PathBuf>,

        /// How deep --scan descends below the root
        #[arg(long, default_value = "4")]
        max_depth: usize,

        /// Add error rate and busiest/slowest tool rankings
        #[arg(long)]
        digest: bool,

        /// Entries per ranking in the digest
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Per-call detail records for one run
    Calls {
        dir: PathBuf,
    },

    /// Show which log file and format a run directory resolves to
    Resolve {
        dir: PathBuf,
    },
}
