//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cw_core::extract::{
    check_reference_codes, read_reference_codes, read_wide_csv, validate_files, ReferenceCheck,
    AREA_CODE, METRIC_CODE,
};
use cw_core::{Config, RawTable};
use cw_warehouse::TableCounts;
use serde::Serialize;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the configuration named by `--config`, or search the current directory.
///
/// Applies the `--database` override after the file is parsed.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_from_dir(Path::new("."))
            .context("Failed to load climate-warehouse.yml from the current directory")?,
    };
    if let Some(database) = &global.database {
        config.database.path = database.clone();
    }
    Ok(config)
}

/// Level used when RUST_LOG is not set
pub(crate) fn log_level(global: &GlobalArgs, config: Option<&Config>) -> log::LevelFilter {
    if global.verbose {
        return log::LevelFilter::Debug;
    }
    config
        .and_then(|c| c.log_level.as_deref())
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

/// Install the logger; RUST_LOG directives override the computed level.
pub(crate) fn init_logging(global: &GlobalArgs, config: Option<&Config>) {
    let _ = env_logger::Builder::new()
        .filter_level(log_level(global, config))
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
}

/// Load config and set up logging, the common prologue of every command
pub(crate) fn prepare(global: &GlobalArgs) -> Result<Config> {
    let config = match load_config(global) {
        Ok(config) => config,
        Err(err) => {
            init_logging(global, None);
            return Err(err);
        }
    };
    init_logging(global, Some(&config));
    Ok(config)
}

/// The main dataset plus the outcome of the reference code check, if run
pub(crate) struct Extracted {
    pub table: RawTable,
    pub reference: Option<ReferenceCheck>,
}

/// Check the inputs exist and read the main dataset.
///
/// With `reference_check` the dataset's codes are also compared against the
/// reference files; unknown codes are logged, not rejected.
pub(crate) fn extract(config: &Config, reference_check: bool) -> Result<Extracted> {
    validate_files(&config.inputs)?;
    let table = read_wide_csv(&config.inputs.main_csv)?;
    let reference = if reference_check {
        let area_codes = read_reference_codes(&config.inputs.area_codes_csv, AREA_CODE)?;
        let metric_codes = read_reference_codes(&config.inputs.elements_csv, METRIC_CODE)?;
        Some(check_reference_codes(&table, &area_codes, &metric_codes))
    } else {
        None
    };
    Ok(Extracted { table, reference })
}

/// One-line summary of a reference code check
pub(crate) fn describe_reference(check: &ReferenceCheck) -> String {
    if check.is_clean() {
        "all codes found in the reference files".to_string()
    } else {
        format!(
            "{} unknown area codes, {} unknown element codes",
            check.unknown_area_codes.len(),
            check.unknown_metric_codes.len()
        )
    }
}

/// JSON envelope written by `cw run --results`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommandResults<T: Serialize> {
    pub timestamp: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub results: T,
}

/// Serialize `data` as pretty-printed JSON and write it to `path`.
///
/// Creates any missing parent directories before writing.
pub(crate) fn write_json_results<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(data).context("Failed to serialize results")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Calculate column widths for a table given headers and row data.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Render a left-aligned table with a dashed separator under the header.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = calculate_column_widths(headers, rows);
    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().map(|h| h.to_string()).collect()));
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push(line(row.clone()));
    }
    out.join("\n")
}

/// Print a formatted table to stdout.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", format_table(headers, rows));
}

/// Print warehouse row counts as a two-column table
pub(crate) fn print_counts(counts: &TableCounts) {
    let rows: Vec<Vec<String>> = counts
        .labelled()
        .iter()
        .map(|(label, count)| vec![label.to_string(), count.to_string()])
        .collect();
    print_table(&["TABLE", "ROWS"], &rows);
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
