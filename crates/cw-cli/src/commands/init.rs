//! Init command implementation - create the warehouse schema

use anyhow::{Context, Result};
use cw_warehouse::migration::current_version;
use cw_warehouse::Warehouse;

use crate::cli::GlobalArgs;
use crate::commands::common::prepare;

/// Execute the init command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let config = prepare(global)?;
    let wh = Warehouse::new(&config.database.path)
        .with_context(|| format!("Failed to initialise {}", config.database.path))?;
    let version = current_version(wh.conn())?;
    println!(
        "Warehouse {} is at schema version {version}",
        config.database.path
    );
    Ok(())
}
