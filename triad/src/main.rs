mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::start::StartOptions;

fn main() -> ExitCode {
    triad_core::observability::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Install { python, strict } => {
            commands::install::cmd_install(cli.root, python, strict)
        }
        Commands::Start {
            dev,
            port,
            dev_port,
            host,
            no_browser,
        } => commands::start::cmd_start(StartOptions {
            root: cli.root,
            dev,
            port,
            dev_port,
            host,
            no_browser,
        }),
    }
}
