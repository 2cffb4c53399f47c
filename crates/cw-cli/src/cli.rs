//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// climate-warehouse - load FAO land temperature change data into a DuckDB star schema
#[derive(Parser, Debug)]
#[command(name = "cw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to climate-warehouse.yml (default: search the current directory)
    #[arg(short, long, global = true, env = "CW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the warehouse database path (`:memory:` for an in-memory run)
    #[arg(short, long, global = true, env = "CW_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, transform and load the dataset into the warehouse
    Run(RunArgs),

    /// Extract and transform only, reporting data quality without loading
    Check(CheckArgs),

    /// Show row counts of the warehouse tables
    Stats,

    /// Create the warehouse schema and exit
    Init,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Rows per staging insert transaction
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Skip the aggregate refresh after the fact load
    #[arg(long)]
    pub no_refresh: bool,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub results: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Skip comparing codes against the area and element reference files
    #[arg(long)]
    pub skip_reference_check: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
