//! Reading the main dataset and the reference files.
//!
//! The main dataset is wide: eight identifier columns followed by one
//! `Y<year>` column per year. Columns that are neither (for example
//! per-year flag columns) are ignored; a `Y<digits>` column whose year does
//! not fit is an error.

use crate::config::InputsConfig;
use crate::error::{CoreError, CoreResult};
use crate::record::{RawRecord, RawTable, RecordIds};
use crate::unpivot::{is_year_column, parse_year_column};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

pub const AREA_CODE: &str = "Area Code";
pub const M49_CODE: &str = "Area Code (M49)";
pub const AREA: &str = "Area";
pub const PERIOD_CODE: &str = "Months Code";
pub const PERIOD: &str = "Months";
pub const METRIC_CODE: &str = "Element Code";
pub const METRIC: &str = "Element";
pub const UNIT: &str = "Unit";

/// Identifier columns required in the main dataset, in [`RecordIds`] order
pub const ID_COLUMNS: [&str; 8] = [
    AREA_CODE,
    M49_CODE,
    AREA,
    PERIOD_CODE,
    PERIOD,
    METRIC_CODE,
    METRIC,
    UNIT,
];

/// Check that every input file exists, reporting all missing files at once
pub fn validate_files(inputs: &InputsConfig) -> CoreResult<()> {
    let mut missing = Vec::new();
    for (label, path) in inputs.labelled() {
        if path.exists() {
            log::info!("{label} found: {}", path.display());
        } else {
            log::error!("{label} not found at: {}", path.display());
            missing.push(label);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InputMissing {
            missing: missing.join(", "),
        })
    }
}

/// Read the wide main dataset from a file
pub fn read_wide_csv(path: &Path) -> CoreResult<RawTable> {
    log::info!("Reading main CSV: {}", path.display());
    let file = std::fs::File::open(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    let table = parse_wide_csv(file, &path.display().to_string())?;
    log::info!(
        "Loaded {} rows with {} year columns",
        table.rows.len(),
        table.year_columns.len()
    );
    Ok(table)
}

/// Parse the wide main dataset from any reader.
///
/// `source` names the input in error messages.
pub fn parse_wide_csv<R: Read>(reader: R, source: &str) -> CoreResult<RawTable> {
    let csv_err = |e: csv::Error| CoreError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(clean_header)
        .collect();

    let mut id_idx = [0usize; 8];
    for (slot, column) in id_idx.iter_mut().zip(ID_COLUMNS) {
        *slot = find_column(&headers, column).ok_or_else(|| CoreError::MissingColumn {
            path: source.to_string(),
            column: column.to_string(),
        })?;
    }

    let year_idx: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_year_column(h))
        .map(|(i, _)| i)
        .collect();
    for &i in &year_idx {
        parse_year_column(&headers[i])?;
    }

    let mut table = RawTable {
        year_columns: year_idx.iter().map(|&i| headers[i].clone()).collect(),
        rows: Vec::new(),
    };

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != headers.len() {
            return Err(CoreError::RaggedRow {
                path: source.to_string(),
                line,
                found: record.len(),
                expected: headers.len(),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        let ids = RecordIds {
            area_code: field(id_idx[0]),
            m49_code: field(id_idx[1]),
            area_name: field(id_idx[2]),
            period_code: field(id_idx[3]),
            period_name: field(id_idx[4]),
            metric_code: field(id_idx[5]),
            metric_name: field(id_idx[6]),
            unit: field(id_idx[7]),
        };

        let values = year_idx
            .iter()
            .map(|&i| {
                let cell = record.get(i).unwrap_or_default();
                parse_value(cell).ok_or_else(|| CoreError::InvalidValue {
                    path: source.to_string(),
                    line,
                    column: headers[i].clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<CoreResult<Vec<Option<f64>>>>()?;

        table.rows.push(RawRecord { ids, values });
    }

    Ok(table)
}

/// Parse a measurement cell: empty or NaN is null, anything else must be numeric.
///
/// Returns `None` when the cell is not a number.
fn parse_value(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() {
        return Some(None);
    }
    let value: f64 = cell.parse().ok()?;
    Some(if value.is_nan() { None } else { Some(value) })
}

/// Read the set of codes in `column` of a reference file
pub fn read_reference_codes(path: &Path, column: &str) -> CoreResult<BTreeSet<String>> {
    let display = path.display().to_string();
    let csv_err = |e: csv::Error| CoreError::Csv {
        path: display.clone(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(clean_header)
        .collect();
    let idx = find_column(&headers, column).ok_or_else(|| CoreError::MissingColumn {
        path: display.clone(),
        column: column.to_string(),
    })?;

    let mut codes = BTreeSet::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        if let Some(code) = record.get(idx).filter(|c| !c.is_empty()) {
            codes.insert(code.to_string());
        }
    }
    log::info!("Loaded {} codes from {}", codes.len(), display);
    Ok(codes)
}

/// Codes used by the main dataset but absent from the reference files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCheck {
    pub unknown_area_codes: BTreeSet<String>,
    pub unknown_metric_codes: BTreeSet<String>,
}

impl ReferenceCheck {
    pub fn is_clean(&self) -> bool {
        self.unknown_area_codes.is_empty() && self.unknown_metric_codes.is_empty()
    }
}

/// Compare the main dataset's codes against the reference code sets.
///
/// Existence check only: unknown codes are logged, never rejected.
pub fn check_reference_codes(
    table: &RawTable,
    area_codes: &BTreeSet<String>,
    metric_codes: &BTreeSet<String>,
) -> ReferenceCheck {
    let mut check = ReferenceCheck::default();
    for row in &table.rows {
        if !area_codes.contains(&row.ids.area_code) {
            check.unknown_area_codes.insert(row.ids.area_code.clone());
        }
        if !metric_codes.contains(&row.ids.metric_code) {
            check
                .unknown_metric_codes
                .insert(row.ids.metric_code.clone());
        }
    }

    if !check.unknown_area_codes.is_empty() {
        log::warn!(
            "{} area codes are missing from the area reference file: {:?}",
            check.unknown_area_codes.len(),
            check.unknown_area_codes
        );
    }
    if !check.unknown_metric_codes.is_empty() {
        log::warn!(
            "{} element codes are missing from the element reference file: {:?}",
            check.unknown_metric_codes.len(),
            check.unknown_metric_codes
        );
    }
    check
}

fn clean_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

fn find_column(headers: &[String], column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
