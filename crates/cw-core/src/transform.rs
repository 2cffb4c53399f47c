//! Transform pipeline: unpivot, classify, validate.

use crate::area::AreaClassifier;
use crate::config::Config;
use crate::error::CoreResult;
use crate::period::PeriodClassifier;
use crate::record::{ClassifiedRecord, LongRecord, RawTable};
use crate::tables::{AreaType, ClassificationTables, PeriodType};
use crate::unpivot::unpivot;
use crate::validate::{validate_records, ValidationReport};
use std::collections::BTreeMap;

/// Attach area and period classification to a single long record.
///
/// Pure over its inputs; the bulk path is this function mapped over the
/// record sequence.
pub fn classify_record(
    record: LongRecord,
    areas: &AreaClassifier<'_>,
    periods: &PeriodClassifier<'_>,
) -> CoreResult<ClassifiedRecord> {
    let attrs = periods.get_period_attributes(&record.ids.period_name)?;
    let area_type = areas.classify_area(&record.ids.area_name);
    Ok(ClassifiedRecord {
        ids: record.ids,
        year: record.year,
        value: record.value,
        area_type,
        period_type: attrs.period_type,
        month_number: attrs.month_number,
        quarter: attrs.quarter,
    })
}

/// Classify every record, stopping at the first unrecognised period name
pub fn classify_records(
    records: Vec<LongRecord>,
    tables: &ClassificationTables,
) -> CoreResult<Vec<ClassifiedRecord>> {
    let areas = AreaClassifier::new(tables);
    let periods = PeriodClassifier::new(tables);
    records
        .into_iter()
        .map(|r| classify_record(r, &areas, &periods))
        .collect()
}

/// Counters describing one transform run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Wide rows read
    pub raw_rows: usize,
    /// Long records after unpivot
    pub long_rows: usize,
    /// Long records per area level
    pub area_types: BTreeMap<AreaType, usize>,
    /// Long records per period level
    pub period_types: BTreeMap<PeriodType, usize>,
    pub validation: ValidationReport,
}

/// Records ready for loading, plus the run counters
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub records: Vec<ClassifiedRecord>,
    pub report: TransformReport,
}

/// Run the full transform over a wide table.
pub fn transform(table: &RawTable, config: &Config) -> CoreResult<TransformOutput> {
    log::info!("Starting transformation pipeline...");
    let mut report = TransformReport {
        raw_rows: table.rows.len(),
        ..Default::default()
    };

    let long = unpivot(table)?;
    report.long_rows = long.len();

    log::info!("Classifying area and period types...");
    let classified = classify_records(long, &config.classification)?;
    for record in &classified {
        *report.area_types.entry(record.area_type).or_default() += 1;
        *report.period_types.entry(record.period_type).or_default() += 1;
    }
    log::info!("Area type distribution: {}", format_counts(&report.area_types));
    log::info!(
        "Period type distribution: {}",
        format_counts(&report.period_types)
    );

    let (records, validation) = validate_records(classified, &config.validation);
    report.validation = validation;

    log::info!(
        "Transformation pipeline completed: {} records",
        records.len()
    );
    Ok(TransformOutput { records, report })
}

/// Render a distribution as `a=1, b=2`
pub fn format_counts<K: std::fmt::Display>(counts: &BTreeMap<K, usize>) -> String {
    counts
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
