//! Dimension derivation and load.
//!
//! Rows are projected from the classified records, deduplicated by their full
//! attribute tuple in first-appearance order, then numbered 1..n. The
//! surrogate key of a row is its position in that sequence, so reloading the
//! same input reproduces the same keys.

use crate::connection::Warehouse;
use crate::error::{DbContext, WarehouseError, WarehouseResult};
use cw_core::{AreaType, ClassifiedRecord, PeriodType};
use duckdb::Connection;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub const DIM_AREA: &str = "core.dim_area";
pub const DIM_TIME_PERIOD: &str = "core.dim_time_period";
pub const DIM_METRIC: &str = "core.dim_metric";

/// One `core.dim_area` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRow {
    pub area_key: i64,
    pub area_code: String,
    /// Natural key
    pub m49_code: String,
    pub area_name: String,
    pub area_type: AreaType,
    /// Filled in by the hierarchy pass
    pub parent_area_key: Option<i64>,
}

/// One `core.dim_time_period` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRow {
    pub period_key: i64,
    /// Natural key
    pub period_code: String,
    pub period_name: String,
    pub period_type: PeriodType,
    pub month_number: Option<u8>,
    pub quarter: Option<u8>,
}

/// One `core.dim_metric` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub metric_key: i64,
    /// Natural key
    pub metric_code: String,
    pub metric_name: String,
    pub unit: String,
}

/// All three dimensions as loaded in one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub areas: Vec<AreaRow>,
    pub periods: Vec<PeriodRow>,
    pub metrics: Vec<MetricRow>,
}

/// Distinct values of `project` over `records`, in first-appearance order
fn distinct<K, F>(records: &[ClassifiedRecord], project: F) -> Vec<K>
where
    K: Hash + Eq + Clone,
    F: Fn(&ClassifiedRecord) -> K,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        let tuple = project(record);
        if seen.insert(tuple.clone()) {
            out.push(tuple);
        }
    }
    out
}

/// Natural keys carried by more than one distinct tuple, in first-appearance order
pub fn conflicting_keys<T>(tuples: &[T], key: impl Fn(&T) -> &str) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for tuple in tuples {
        let k = key(tuple);
        let count = counts.entry(k).or_insert(0);
        if *count == 0 {
            order.push(k);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter(|k| counts[k] > 1)
        .map(str::to_string)
        .collect()
}

/// Report natural-key conflicts and settle them.
///
/// Strict mode fails; otherwise the first tuple seen for each key wins so the
/// fact join stays one row per staged record.
fn settle_conflicts<T>(
    dimension: &str,
    tuples: Vec<T>,
    key: impl Fn(&T) -> &str,
    strict: bool,
) -> WarehouseResult<Vec<T>> {
    let conflicts = conflicting_keys(&tuples, &key);
    if conflicts.is_empty() {
        return Ok(tuples);
    }

    log::warn!(
        "{dimension}: {} natural keys map to more than one row: {}",
        conflicts.len(),
        conflicts.join(", ")
    );
    if strict {
        return Err(WarehouseError::NaturalKeyConflict {
            dimension: dimension.to_string(),
            keys: conflicts,
        });
    }

    let mut seen = HashSet::new();
    let kept = tuples
        .into_iter()
        .filter(|t| seen.insert(key(t).to_string()))
        .collect();
    Ok(kept)
}

fn surrogate(index: usize) -> i64 {
    index as i64 + 1
}

/// Distinct area rows with keys assigned; parents are left unresolved
pub fn area_rows(records: &[ClassifiedRecord], strict: bool) -> WarehouseResult<Vec<AreaRow>> {
    let tuples = distinct(records, |r| {
        (
            r.ids.area_code.clone(),
            r.ids.m49_code.clone(),
            r.ids.area_name.clone(),
            r.area_type,
        )
    });
    let tuples = settle_conflicts(DIM_AREA, tuples, |t| t.1.as_str(), strict)?;
    Ok(tuples
        .into_iter()
        .enumerate()
        .map(|(i, (area_code, m49_code, area_name, area_type))| AreaRow {
            area_key: surrogate(i),
            area_code,
            m49_code,
            area_name,
            area_type,
            parent_area_key: None,
        })
        .collect())
}

/// Distinct time period rows with keys assigned
pub fn period_rows(records: &[ClassifiedRecord], strict: bool) -> WarehouseResult<Vec<PeriodRow>> {
    let tuples = distinct(records, |r| {
        (
            r.ids.period_code.clone(),
            r.ids.period_name.clone(),
            r.period_type,
            r.month_number,
            r.quarter,
        )
    });
    let tuples = settle_conflicts(DIM_TIME_PERIOD, tuples, |t| t.0.as_str(), strict)?;
    Ok(tuples
        .into_iter()
        .enumerate()
        .map(
            |(i, (period_code, period_name, period_type, month_number, quarter))| PeriodRow {
                period_key: surrogate(i),
                period_code,
                period_name,
                period_type,
                month_number,
                quarter,
            },
        )
        .collect())
}

/// Distinct metric rows with keys assigned
pub fn metric_rows(records: &[ClassifiedRecord], strict: bool) -> WarehouseResult<Vec<MetricRow>> {
    let tuples = distinct(records, |r| {
        (
            r.ids.metric_code.clone(),
            r.ids.metric_name.clone(),
            r.ids.unit.clone(),
        )
    });
    let tuples = settle_conflicts(DIM_METRIC, tuples, |t| t.0.as_str(), strict)?;
    Ok(tuples
        .into_iter()
        .enumerate()
        .map(|(i, (metric_code, metric_name, unit))| MetricRow {
            metric_key: surrogate(i),
            metric_code,
            metric_name,
            unit,
        })
        .collect())
}

fn insert_areas(conn: &Connection, rows: &[AreaRow]) -> WarehouseResult<()> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO core.dim_area \
             (area_key, area_code, m49_code, area_name, area_type, parent_area_key) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .db_context("prepare dim_area insert")?;
    for row in rows {
        stmt.execute(duckdb::params![
            row.area_key,
            row.area_code,
            row.m49_code,
            row.area_name,
            row.area_type.as_str(),
            row.parent_area_key,
        ])
        .db_context("insert dim_area")?;
    }
    Ok(())
}

fn insert_periods(conn: &Connection, rows: &[PeriodRow]) -> WarehouseResult<()> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO core.dim_time_period \
             (period_key, period_code, period_name, period_type, month_number, quarter) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .db_context("prepare dim_time_period insert")?;
    for row in rows {
        stmt.execute(duckdb::params![
            row.period_key,
            row.period_code,
            row.period_name,
            row.period_type.as_str(),
            row.month_number.map(i32::from),
            row.quarter.map(i32::from),
        ])
        .db_context("insert dim_time_period")?;
    }
    Ok(())
}

fn insert_metrics(conn: &Connection, rows: &[MetricRow]) -> WarehouseResult<()> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO core.dim_metric (metric_key, metric_code, metric_name, unit) \
             VALUES (?, ?, ?, ?)",
        )
        .db_context("prepare dim_metric insert")?;
    for row in rows {
        stmt.execute(duckdb::params![
            row.metric_key,
            row.metric_code,
            row.metric_name,
            row.unit,
        ])
        .db_context("insert dim_metric")?;
    }
    Ok(())
}

/// Rebuild `core.dim_area` from the records
pub fn load_dim_area(
    wh: &Warehouse,
    records: &[ClassifiedRecord],
    strict: bool,
) -> WarehouseResult<Vec<AreaRow>> {
    let rows = area_rows(records, strict)?;
    wh.truncate(DIM_AREA)?;
    wh.transaction(|conn| insert_areas(conn, &rows))?;
    log::info!("Loaded {} rows into {DIM_AREA}", rows.len());
    Ok(rows)
}

/// Rebuild `core.dim_time_period` from the records
pub fn load_dim_time_period(
    wh: &Warehouse,
    records: &[ClassifiedRecord],
    strict: bool,
) -> WarehouseResult<Vec<PeriodRow>> {
    let rows = period_rows(records, strict)?;
    wh.truncate(DIM_TIME_PERIOD)?;
    wh.transaction(|conn| insert_periods(conn, &rows))?;
    log::info!("Loaded {} rows into {DIM_TIME_PERIOD}", rows.len());
    Ok(rows)
}

/// Rebuild `core.dim_metric` from the records
pub fn load_dim_metric(
    wh: &Warehouse,
    records: &[ClassifiedRecord],
    strict: bool,
) -> WarehouseResult<Vec<MetricRow>> {
    let rows = metric_rows(records, strict)?;
    wh.truncate(DIM_METRIC)?;
    wh.transaction(|conn| insert_metrics(conn, &rows))?;
    log::info!("Loaded {} rows into {DIM_METRIC}", rows.len());
    Ok(rows)
}

/// Rebuild all three dimensions: area, then time period, then metric
pub fn load_dimensions(
    wh: &Warehouse,
    records: &[ClassifiedRecord],
    strict: bool,
) -> WarehouseResult<Dimensions> {
    Ok(Dimensions {
        areas: load_dim_area(wh, records, strict)?,
        periods: load_dim_time_period(wh, records, strict)?,
        metrics: load_dim_metric(wh, records, strict)?,
    })
}

#[cfg(test)]
#[path = "dimension_test.rs"]
mod tests;
