//! Stats command implementation

use anyhow::Result;
use cw_warehouse::Warehouse;

use crate::cli::GlobalArgs;
use crate::commands::common::{prepare, print_counts};

/// Execute the stats command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let config = prepare(global)?;
    let wh = Warehouse::new(&config.database.path)?;
    println!("Warehouse: {}\n", config.database.path);
    print_counts(&wh.table_counts()?);
    Ok(())
}
