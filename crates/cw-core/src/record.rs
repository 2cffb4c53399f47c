//! Record shapes flowing through the transform pipeline.

use crate::tables::{AreaType, PeriodType};

/// Identifier columns shared by every row of the main dataset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordIds {
    pub area_code: String,
    pub m49_code: String,
    pub area_name: String,
    pub period_code: String,
    pub period_name: String,
    pub metric_code: String,
    pub metric_name: String,
    pub unit: String,
}

/// One wide input row: identifiers plus one cell per year column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub ids: RecordIds,
    /// Parallel to [`RawTable::year_columns`]
    pub values: Vec<Option<f64>>,
}

/// The wide dataset as read from the main CSV
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    /// Year column labels in file order, e.g. `Y1961`
    pub year_columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    /// Number of long records an unpivot of this table produces
    pub fn long_len(&self) -> usize {
        self.rows.len() * self.year_columns.len()
    }
}

/// One measurement: a single (area, period, metric, year) cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LongRecord {
    pub ids: RecordIds,
    pub year: i32,
    pub value: Option<f64>,
}

/// A long record with its area and period classification attached
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub ids: RecordIds,
    pub year: i32,
    pub value: Option<f64>,
    pub area_type: AreaType,
    pub period_type: PeriodType,
    pub month_number: Option<u8>,
    pub quarter: Option<u8>,
}
