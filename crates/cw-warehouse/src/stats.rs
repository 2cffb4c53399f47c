//! Row counts for the warehouse tables.

use crate::connection::Warehouse;
use crate::dimension::{DIM_AREA, DIM_METRIC, DIM_TIME_PERIOD};
use crate::error::WarehouseResult;
use crate::fact::FACT_TABLE;
use crate::staging::STAGING_TABLE;
use std::fmt;

/// Row counts of the staging, dimension and fact tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub staging: i64,
    pub areas: i64,
    pub periods: i64,
    pub metrics: i64,
    pub facts: i64,
}

impl TableCounts {
    /// (label, count) pairs in display order
    pub fn labelled(&self) -> [(&'static str, i64); 5] {
        [
            ("Staging", self.staging),
            ("Areas", self.areas),
            ("Time Periods", self.periods),
            ("Metrics", self.metrics),
            ("Facts", self.facts),
        ]
    }
}

impl fmt::Display for TableCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, count) in self.labelled() {
            writeln!(f, "  {label:<14}{count:>12}")?;
        }
        Ok(())
    }
}

impl Warehouse {
    /// Current row counts of the five loaded tables
    pub fn table_counts(&self) -> WarehouseResult<TableCounts> {
        Ok(TableCounts {
            staging: self.row_count(STAGING_TABLE)?,
            areas: self.row_count(DIM_AREA)?,
            periods: self.row_count(DIM_TIME_PERIOD)?,
            metrics: self.row_count(DIM_METRIC)?,
            facts: self.row_count(FACT_TABLE)?,
        })
    }
}
