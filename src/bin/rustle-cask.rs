use anyhow::Result;
use clap::Parser;
use rustle_cask::cli::{run, RustleCaskCli};
use std::process::ExitCode;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = RustleCaskCli::parse();

    // Logs go to stderr so stdout stays parseable
    let level = match cli.verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting rustle-cask v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(err) => {
            error!("{err:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}
