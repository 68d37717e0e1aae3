//! Binary crate for the `weather-collector` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Wiring settings, fetch and CSV append into one run
//! - Mapping the outcome to an exit code for schedulers

use std::process::ExitCode;

use tracing::error;

mod cli;
mod logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();

    let cmd = cli::Cli::parse_tolerant();
    if let Err(err) = cmd.run().await {
        error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
