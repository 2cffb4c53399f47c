//! Check command implementation - extract and transform without loading

use anyhow::Result;
use cw_core::transform::format_counts;
use cw_core::{transform, TransformReport};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::{describe_reference, extract, prepare, print_table};

/// Execute the check command
pub(crate) fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let config = prepare(global)?;
    let extracted = extract(&config, !args.skip_reference_check)?;
    let output = transform(&extracted.table, &config)?;
    print_report(&output.report);
    if let Some(check) = &extracted.reference {
        println!("Reference codes: {}", describe_reference(check));
    }
    Ok(())
}

fn print_report(report: &TransformReport) {
    let v = &report.validation;
    let rows: Vec<Vec<String>> = [
        ("Wide rows", report.raw_rows),
        ("Long records", report.long_rows),
        ("Null values", v.null_values),
        ("Dropped (year out of range)", v.dropped_years),
        ("Flagged (extreme value)", v.flagged_values),
        ("Retained", v.retained),
    ]
    .iter()
    .map(|(label, n)| vec![label.to_string(), n.to_string()])
    .collect();

    print_table(&["CHECK", "RECORDS"], &rows);
    println!();
    println!("Area types:   {}", format_counts(&report.area_types));
    println!("Period types: {}", format_counts(&report.period_types));
}
