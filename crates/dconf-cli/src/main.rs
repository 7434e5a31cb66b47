//! dconf-manager CLI
//!
//! Keeps a dconf subtree in line with declarative INI files.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let color = output::resolve_color(cli.color);
    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {}", e)))?;

    let report = commands::run_reconcile(&cli, color)?;
    tracing::debug!(
        rendered = report.rendered,
        writes = report.writes,
        resets = report.resets,
        "done"
    );
    Ok(())
}
