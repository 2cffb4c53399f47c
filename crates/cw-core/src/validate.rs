//! Data quality checks applied after classification.
//!
//! Only the year window is a hard filter. Null measurements are counted and
//! kept, and out-of-range temperature changes are logged and kept.

use crate::config::ValidationConfig;
use crate::record::ClassifiedRecord;

/// Number of flagged records echoed to the log
const FLAGGED_SAMPLE: usize = 5;

/// Counters produced by [`validate_records`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Records received
    pub input: usize,
    /// Records whose value is null (kept)
    pub null_values: usize,
    /// Records dropped for a year outside the window
    pub dropped_years: usize,
    /// Temperature changes outside the configured bounds (kept)
    pub flagged_values: usize,
    /// Records returned
    pub retained: usize,
}

/// True if `year` lies inside the configured window (inclusive)
pub fn year_in_range(year: i32, config: &ValidationConfig) -> bool {
    (config.min_year..=config.max_year).contains(&year)
}

/// True if the record is a temperature change outside the configured bounds
pub fn is_extreme_temperature(record: &ClassifiedRecord, config: &ValidationConfig) -> bool {
    if record.ids.metric_name != config.temperature_metric {
        return false;
    }
    match record.value {
        Some(v) => v < config.min_temp_change || v > config.max_temp_change,
        None => false,
    }
}

/// Apply the year filter and the temperature flag to a batch of records.
pub fn validate_records(
    records: Vec<ClassifiedRecord>,
    config: &ValidationConfig,
) -> (Vec<ClassifiedRecord>, ValidationReport) {
    let mut report = ValidationReport {
        input: records.len(),
        ..Default::default()
    };

    report.null_values = records.iter().filter(|r| r.value.is_none()).count();
    if report.input > 0 {
        log::info!(
            "Records with null values: {} ({:.1}%)",
            report.null_values,
            report.null_values as f64 / report.input as f64 * 100.0
        );
    }

    let retained: Vec<ClassifiedRecord> = records
        .into_iter()
        .filter(|r| year_in_range(r.year, config))
        .collect();
    report.dropped_years = report.input - retained.len();
    if report.dropped_years > 0 {
        log::warn!(
            "Removing {} records with years outside {}..={}",
            report.dropped_years,
            config.min_year,
            config.max_year
        );
    }

    let extreme: Vec<&ClassifiedRecord> = retained
        .iter()
        .filter(|r| is_extreme_temperature(r, config))
        .collect();
    report.flagged_values = extreme.len();
    if !extreme.is_empty() {
        log::warn!(
            "Found {} '{}' records outside reasonable range ({} to {}°C); keeping them",
            extreme.len(),
            config.temperature_metric,
            config.min_temp_change,
            config.max_temp_change
        );
        for r in extreme.iter().take(FLAGGED_SAMPLE) {
            log::warn!(
                "  {} {} {}: {:?}",
                r.ids.area_name,
                r.ids.period_name,
                r.year,
                r.value
            );
        }
    }

    report.retained = retained.len();
    log::info!("Validation complete: {} records retained", report.retained);
    (retained, report)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
