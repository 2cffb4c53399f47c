//! climate-warehouse CLI - load the FAO temperature dataset into DuckDB

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{check, init, run, stats};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global),
        cli::Commands::Check(args) => check::execute(args, &cli.global),
        cli::Commands::Stats => stats::execute(&cli.global),
        cli::Commands::Init => init::execute(&cli.global),
    }
}
