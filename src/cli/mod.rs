//! Command-line interface definitions.

pub mod check;
pub mod run;
pub mod status;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Process exit status for a clean run.
pub const EXIT_OK: i32 = 0;
/// Exit status for an unexpected error (only with `--strict`, or from
/// operator commands).
pub const EXIT_ERROR: i32 = 1;
/// Exit status for a failed delivery or save (only with `--strict`).
pub const EXIT_CYCLE_FAILED: i32 = 2;

/// fxwatch - Exchange-rate threshold alerts for scheduled jobs.
#[derive(Parser, Debug)]
#[command(name = "fxwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file [default: fxwatch.toml when present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the rate once and notify if the threshold is reached (default)
    Run(RunArgs),

    /// Show the persisted notification state
    Status,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `fxwatch check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration and environment
    Config,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Log the alert instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Exit non-zero on unexpected errors and failed deliveries or saves
    #[arg(long)]
    pub strict: bool,
}
