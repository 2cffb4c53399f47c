//! Fact table load: one set-oriented join of staging against the dimensions.

use crate::connection::Warehouse;
use crate::error::{DbContext, WarehouseResult};

pub const FACT_TABLE: &str = "core.fact_temperature";

const INSERT_FACTS: &str = "
INSERT INTO core.fact_temperature (area_key, period_key, metric_key, year, value)
SELECT a.area_key, p.period_key, m.metric_key, s.year, s.value
FROM staging.raw_temperature s
JOIN core.dim_area a ON a.m49_code = s.m49_code
JOIN core.dim_time_period p ON p.period_code = s.period_code
JOIN core.dim_metric m ON m.metric_code = s.metric_code";

const COUNT_EXCLUDED: &str = "
SELECT COUNT(*)
FROM staging.raw_temperature s
WHERE NOT EXISTS (SELECT 1 FROM core.dim_area a WHERE a.m49_code = s.m49_code)
   OR NOT EXISTS (SELECT 1 FROM core.dim_time_period p WHERE p.period_code = s.period_code)
   OR NOT EXISTS (SELECT 1 FROM core.dim_metric m WHERE m.metric_code = s.metric_code)";

/// Outcome of a fact load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactReport {
    /// Rows written to the fact table
    pub inserted: usize,
    /// Staged rows with no match in at least one dimension
    pub excluded: usize,
}

/// Rebuild the fact table from staging.
///
/// Staged rows that miss any dimension are left out and counted.
pub fn load_facts(wh: &Warehouse) -> WarehouseResult<FactReport> {
    wh.truncate(FACT_TABLE)?;
    let report = wh.transaction(|conn| {
        let inserted = conn.execute(INSERT_FACTS, []).db_context("insert facts")?;
        let excluded: i64 = conn
            .query_row(COUNT_EXCLUDED, [], |row| row.get(0))
            .db_context("count excluded facts")?;
        Ok(FactReport {
            inserted,
            excluded: excluded as usize,
        })
    })?;

    log::info!("Loaded {} rows into {FACT_TABLE}", report.inserted);
    if report.excluded > 0 {
        log::warn!(
            "{} staged rows had no matching dimension row and were excluded",
            report.excluded
        );
    }
    Ok(report)
}

#[cfg(test)]
#[path = "fact_test.rs"]
mod tests;
