use super::args::{Cli, Commands};
use super::handlers;
use crate::logging;
use anyhow::Result;
use mcplens_runtime::{Config, RunMetricsService};

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    logging::init(&config.log_level, cli.verbose);

    let service = RunMetricsService::from_config(&config);
    let output = handlers::Output {
        compact: cli.compact,
    };

    match cli.command {
        Commands::Metrics {
            dirs,
            scan,
            max_depth,
            digest,
            top,
        } => {
            let dirs = handlers::metrics::collect_dirs(dirs, scan.as_deref(), max_depth)?;
            let digest = digest.then_some(top);
            handlers::metrics::handle(&service, &dirs, digest, output)
        }
        Commands::Calls { dir } => handlers::calls::handle(&service, &dir, output),
        Commands::Resolve { dir } => handlers::resolve::handle(&dir, output),
    }
}
