mod cli;
mod dispatcher;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use dispatcher::OutputOptions;
use etfcalc::config;

fn main() -> ExitCode {
    // Logs go to stderr so JSON on stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let opts = OutputOptions::resolve(&cli, &config);
    if !opts.color {
        colored::control::set_override(false);
    }

    let request = cli::runner::to_request(cli.command.as_ref(), &config)?;
    dispatcher::dispatch(request, opts)
}
