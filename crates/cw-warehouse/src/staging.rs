//! Staging table load.

use crate::connection::Warehouse;
use crate::error::{DbContext, WarehouseError, WarehouseResult};
use cw_core::ClassifiedRecord;

pub const STAGING_TABLE: &str = "staging.raw_temperature";

const STAGING_SCHEMA: &str = "staging";
const STAGING_NAME: &str = "raw_temperature";

/// Empty the staging table
pub fn truncate_staging(wh: &Warehouse) -> WarehouseResult<usize> {
    wh.truncate(STAGING_TABLE)
}

/// Append records to staging in chunks of `batch_size`.
///
/// Rows go through a DuckDB appender in the column order of
/// `staging.raw_temperature`. Each chunk commits in its own transaction; a failure part way through
/// leaves the earlier chunks in place. Returns the number of rows inserted.
pub fn load_staging(
    wh: &Warehouse,
    records: &[ClassifiedRecord],
    batch_size: usize,
) -> WarehouseResult<usize> {
    if batch_size == 0 {
        return Err(WarehouseError::LoadError(
            "staging batch size must be greater than zero".to_string(),
        ));
    }

    let batches = records.len().div_ceil(batch_size);
    let mut inserted = 0;
    for (n, chunk) in records.chunks(batch_size).enumerate() {
        inserted += wh.transaction(|conn| {
            let mut appender = conn
                .appender_to_db(STAGING_NAME, STAGING_SCHEMA)
                .db_context("open staging appender")?;
            for r in chunk {
                appender
                    .append_row(duckdb::params![
                        r.ids.area_code,
                        r.ids.m49_code,
                        r.ids.area_name,
                        r.ids.period_code,
                        r.ids.period_name,
                        r.ids.metric_code,
                        r.ids.metric_name,
                        r.ids.unit,
                        r.year,
                        r.value,
                    ])
                    .map_err(|e| WarehouseError::LoadError(format!("staging append failed: {e}")))?;
            }
            appender
                .flush()
                .map_err(|e| WarehouseError::LoadError(format!("staging flush failed: {e}")))?;
            Ok(chunk.len())
        })?;
        log::debug!("Loaded batch {}/{} ({} rows)", n + 1, batches, chunk.len());
    }

    log::info!("Loaded {inserted} rows into {STAGING_TABLE}");
    Ok(inserted)
}

#[cfg(test)]
#[path = "staging_test.rs"]
mod tests;
