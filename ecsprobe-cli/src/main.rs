//! ecsprobe -- command-line entry point.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use ecsprobe_core::config::ProbeConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = ProbeConfig::load_or_default(&cli.config).await;

    let mut general = loaded
        .as_ref()
        .map(|config| config.general.clone())
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    logging::init_tracing(&general)?;
    ecsprobe_core::metrics::describe_all();

    tracing::debug!(config = %cli.config.display(), "ecsprobe starting");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Verify(args) => commands::verify::execute(args, loaded?, &writer).await,
        Commands::Checks => commands::checks::execute(&writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
