//! # Smart Compact CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Settings resolution (defaults, settings file, flags)
//! - The compact dispatch flow and its exit status
//! - Dry-run and diagnostics commands

mod cli;
mod commands;
mod error;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use observability::ObservabilityConfig;
use tracing::{error, info};

use cli::{Cli, Commands};
use commands::{run_check, run_dispatch, run_info};
use error::CliError;
use settings::resolve_settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config =
        ObservabilityConfig::from_verbosity(cli.verbose, cli.quiet, cli.log_format.into());
    if let Err(e) = observability::init_with_config(config) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Smart Compact starting"
    );

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute(cli: &Cli) -> Result<(), CliError> {
    let settings = resolve_settings(&cli.settings)?;

    match &cli.command {
        None | Some(Commands::Run) => run_dispatch(settings).await,
        Some(Commands::Check(args)) => run_check(args, settings).await,
        Some(Commands::Info(args)) => run_info(args, settings),
    }
}
