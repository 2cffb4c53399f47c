//! Reporting period classification.

use crate::error::{CoreError, CoreResult};
use crate::tables::{ClassificationTables, PeriodType};

/// Temporal attributes derived from a period name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodAttributes {
    pub period_type: PeriodType,
    /// 1..=12 for months
    pub month_number: Option<u8>,
    /// 1..=4 for seasons
    pub quarter: Option<u8>,
}

/// Classifies period names into months, seasons and the annual period
#[derive(Debug, Clone, Copy)]
pub struct PeriodClassifier<'a> {
    tables: &'a ClassificationTables,
}

impl<'a> PeriodClassifier<'a> {
    /// Create a classifier over the given tables
    pub fn new(tables: &'a ClassificationTables) -> Self {
        Self { tables }
    }

    /// Classify a period name.
    ///
    /// Unlike areas there is no fallback level: a name outside every period
    /// list is an [`CoreError::UnrecognizedPeriod`].
    pub fn classify_period(&self, name: &str) -> CoreResult<PeriodType> {
        let trimmed = name.trim();
        if self.tables.months.iter().any(|m| m == trimmed) {
            Ok(PeriodType::Month)
        } else if self.tables.seasons.iter().any(|s| s == trimmed) {
            Ok(PeriodType::Season)
        } else if self.tables.annual.iter().any(|a| a == trimmed) {
            Ok(PeriodType::Annual)
        } else {
            Err(CoreError::UnrecognizedPeriod {
                name: name.to_string(),
            })
        }
    }

    /// Month number for a month name
    pub fn get_month_number(&self, name: &str) -> Option<u8> {
        self.tables.month_numbers.get(name.trim()).copied()
    }

    /// Quarter for a season name
    pub fn get_quarter(&self, name: &str) -> Option<u8> {
        self.tables.season_quarters.get(name.trim()).copied()
    }

    /// Period type, month number and quarter in one lookup
    pub fn get_period_attributes(&self, name: &str) -> CoreResult<PeriodAttributes> {
        Ok(PeriodAttributes {
            period_type: self.classify_period(name)?,
            month_number: self.get_month_number(name),
            quarter: self.get_quarter(name),
        })
    }
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
