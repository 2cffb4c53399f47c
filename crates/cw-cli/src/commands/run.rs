//! Run command implementation - extract, transform and load

use anyhow::{Context, Result};
use chrono::Utc;
use cw_core::transform;
use cw_warehouse::{connect, load_warehouse, AnalyticsRefresh, LoadReport};
use serde::Serialize;
use std::time::Instant;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{extract, prepare, print_counts, write_json_results, CommandResults};

/// Per-run figures written with `--results`
#[derive(Debug, Clone, Serialize)]
struct RunSummary {
    database: String,
    raw_rows: usize,
    long_rows: usize,
    null_values: usize,
    dropped_years: usize,
    flagged_values: usize,
    staged: usize,
    facts_inserted: usize,
    facts_excluded: usize,
    unresolved_parents: Vec<String>,
    refreshed: Option<String>,
    staging_rows: i64,
    area_rows: i64,
    period_rows: i64,
    metric_rows: i64,
    fact_rows: i64,
}

/// Execute the run command
pub(crate) fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let start = Instant::now();
    let started_at = Utc::now();
    let mut config = prepare(global)?;
    if let Some(batch_size) = args.batch_size {
        config.load.batch_size = batch_size;
    }
    if args.no_refresh {
        config.load.refresh_aggregates = false;
    }
    config.validate().context("Invalid configuration")?;

    log::info!("Starting climate warehouse load");
    let extracted = extract(&config, true)?;
    let output = transform(&extracted.table, &config)?;

    let wh = connect(&config.database.path)?;
    let report = load_warehouse(
        &wh,
        &output.records,
        &config.load,
        &config.classification,
        Some(&AnalyticsRefresh),
    )
    .map_err(|err| {
        if let Some(step) = err.step() {
            log::error!("Load stopped at step {step}: {}", err.root());
        }
        err
    })
    .context("Warehouse load failed")?;

    let elapsed_secs = start.elapsed().as_secs_f64();
    log::info!("Load completed in {elapsed_secs:.2}s");
    print_report(&report, &config.database.path, elapsed_secs);

    if let Some(path) = &args.results {
        let v = &output.report.validation;
        let summary = RunSummary {
            database: config.database.path.clone(),
            raw_rows: output.report.raw_rows,
            long_rows: output.report.long_rows,
            null_values: v.null_values,
            dropped_years: v.dropped_years,
            flagged_values: v.flagged_values,
            staged: report.staged,
            facts_inserted: report.facts.inserted,
            facts_excluded: report.facts.excluded,
            unresolved_parents: report.unresolved_parents.clone(),
            refreshed: report.refreshed.clone(),
            staging_rows: report.counts.staging,
            area_rows: report.counts.areas,
            period_rows: report.counts.periods,
            metric_rows: report.counts.metrics,
            fact_rows: report.counts.facts,
        };
        write_json_results(
            path,
            &CommandResults {
                timestamp: started_at,
                elapsed_secs,
                results: summary,
            },
        )?;
        println!("Results written to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &LoadReport, database: &str, elapsed_secs: f64) {
    println!("Loaded warehouse {database} in {elapsed_secs:.2}s\n");
    print_counts(&report.counts);
    println!();
    if report.facts.excluded > 0 {
        println!(
            "{} staged rows had no matching dimension row and were excluded",
            report.facts.excluded
        );
    }
    if !report.unresolved_parents.is_empty() {
        println!(
            "Areas without a parent: {}",
            report.unresolved_parents.join(", ")
        );
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
