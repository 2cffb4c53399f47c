//! Post-load aggregate refresh.

use crate::connection::Warehouse;
use crate::error::{WarehouseError, WarehouseResult};
use duckdb::Connection;

/// A step that rebuilds derived tables once the facts are loaded.
///
/// Implementations run inside a single transaction opened by
/// [`run_refresh`].
pub trait AggregateRefresh {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    /// Rebuild the derived tables
    fn refresh(&self, conn: &Connection) -> WarehouseResult<()>;
}

/// Rebuilds the `analytics` summary tables
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsRefresh;

const ANNUAL_AREA_TEMPERATURE: &str = "
CREATE OR REPLACE TABLE analytics.annual_area_temperature AS
SELECT a.area_key, a.area_name, a.area_type, m.metric_name, m.unit, f.year, f.value
FROM core.fact_temperature f
JOIN core.dim_area a ON a.area_key = f.area_key
JOIN core.dim_time_period p ON p.period_key = f.period_key
JOIN core.dim_metric m ON m.metric_key = f.metric_key
WHERE p.period_type = 'annual'";

const DECADE_SUMMARY: &str = "
CREATE OR REPLACE TABLE analytics.decade_summary AS
SELECT a.area_type,
       m.metric_name,
       p.period_type,
       CAST(f.year - f.year % 10 AS INTEGER) AS decade,
       AVG(f.value) AS avg_value,
       MIN(f.value) AS min_value,
       MAX(f.value) AS max_value,
       COUNT(f.value) AS observation_count
FROM core.fact_temperature f
JOIN core.dim_area a ON a.area_key = f.area_key
JOIN core.dim_time_period p ON p.period_key = f.period_key
JOIN core.dim_metric m ON m.metric_key = f.metric_key
GROUP BY ALL";

impl AggregateRefresh for AnalyticsRefresh {
    fn name(&self) -> &str {
        "analytics"
    }

    fn refresh(&self, conn: &Connection) -> WarehouseResult<()> {
        for (table, sql) in [
            ("analytics.annual_area_temperature", ANNUAL_AREA_TEMPERATURE),
            ("analytics.decade_summary", DECADE_SUMMARY),
        ] {
            conn.execute_batch(sql)
                .map_err(|e| WarehouseError::RefreshError {
                    name: self.name().to_string(),
                    message: format!("{table}: {e}"),
                })?;
            log::debug!("Rebuilt {table}");
        }
        Ok(())
    }
}

/// Run one refresh in its own transaction
pub fn run_refresh(wh: &Warehouse, refresh: &dyn AggregateRefresh) -> WarehouseResult<()> {
    log::info!("Refreshing aggregates: {}", refresh.name());
    wh.transaction(|conn| refresh.refresh(conn))
}

#[cfg(test)]
#[path = "refresh_test.rs"]
mod tests;
