//! Wide-to-long reshaping of the main dataset.

use crate::error::{CoreError, CoreResult};
use crate::record::{LongRecord, RawTable};

/// Prefix carried by every year column label
pub const YEAR_PREFIX: char = 'Y';

/// Extract the year from a `Y<year>` column label.
pub fn parse_year_column(label: &str) -> CoreResult<i32> {
    let invalid = || CoreError::InvalidYearColumn {
        column: label.to_string(),
    };
    if !is_year_column(label) {
        return Err(invalid());
    }
    label.trim()[YEAR_PREFIX.len_utf8()..]
        .parse()
        .map_err(|_| invalid())
}

/// True if `label` has the `Y<digits>` shape.
///
/// Shape only: a label like `Y99999999999` matches here and then fails in
/// [`parse_year_column`].
pub fn is_year_column(label: &str) -> bool {
    label
        .trim()
        .strip_prefix(YEAR_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Reshape every wide row into one long record per year column.
///
/// Output length is always `rows × year_columns`; a cell missing from a short
/// row becomes a null value. Records are emitted row-major so the output is
/// deterministic for a given input.
pub fn unpivot(table: &RawTable) -> CoreResult<Vec<LongRecord>> {
    let years = table
        .year_columns
        .iter()
        .map(|c| parse_year_column(c))
        .collect::<CoreResult<Vec<i32>>>()?;

    if let (Some(first), Some(last)) = (table.year_columns.first(), table.year_columns.last()) {
        log::info!(
            "Found {} year columns: {} to {}",
            years.len(),
            first,
            last
        );
    }

    let mut records = Vec::with_capacity(table.long_len());
    for row in &table.rows {
        for (idx, year) in years.iter().enumerate() {
            records.push(LongRecord {
                ids: row.ids.clone(),
                year: *year,
                value: row.values.get(idx).copied().flatten(),
            });
        }
    }

    log::info!("Unpivoted to {} rows", records.len());
    Ok(records)
}

#[cfg(test)]
#[path = "unpivot_test.rs"]
mod tests;
