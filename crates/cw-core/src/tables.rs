//! Static classification tables for areas and periods.
//!
//! The tables are plain configuration: classifiers borrow a
//! [`ClassificationTables`] instead of reading global state, so a test can
//! hand them a trimmed-down table and a deployment can override the defaults
//! from `climate-warehouse.yml`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Level of a geographic area in the world → continent → subregion → country tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaType {
    /// The single top-level aggregate
    World,
    /// One of the continental aggregates
    Continent,
    /// A statistical subregion of a continent
    Subregion,
    /// Anything else, including unrecognised names
    Country,
}

impl AreaType {
    /// Value stored in `core.dim_area.area_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::World => "world",
            AreaType::Continent => "continent",
            AreaType::Subregion => "subregion",
            AreaType::Country => "country",
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of a reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// A calendar month
    Month,
    /// A three-month meteorological season
    Season,
    /// The meteorological year
    Annual,
}

impl PeriodType {
    /// Value stored in `core.dim_time_period.period_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Month => "month",
            PeriodType::Season => "season",
            PeriodType::Annual => "annual",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership lists and lookup maps used by the area and period classifiers.
///
/// Every field defaults to the FAO land-temperature tables, so a config file
/// only needs to name the lists it wants to replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationTables {
    /// Names classified as `world`
    pub world: Vec<String>,

    /// Names classified as `continent`
    pub continents: Vec<String>,

    /// Names classified as `subregion`
    pub subregions: Vec<String>,

    /// Parent continent of each subregion
    pub subregion_continents: HashMap<String, String>,

    /// Names classified as `month`
    pub months: Vec<String>,

    /// Names classified as `season`, in every accepted spelling
    pub seasons: Vec<String>,

    /// Names classified as `annual`
    pub annual: Vec<String>,

    /// Month name → 1..=12
    pub month_numbers: HashMap<String, u8>,

    /// Season spelling → 1..=4
    pub season_quarters: HashMap<String, u8>,
}

const WORLD: &[&str] = &["World"];

const CONTINENTS: &[&str] = &["Africa", "Americas", "Asia", "Europe", "Oceania"];

/// (subregion, continent) pairs
const SUBREGIONS: &[(&str, &str)] = &[
    ("Eastern Africa", "Africa"),
    ("Middle Africa", "Africa"),
    ("Northern Africa", "Africa"),
    ("Southern Africa", "Africa"),
    ("Western Africa", "Africa"),
    ("Caribbean", "Americas"),
    ("Central America", "Americas"),
    ("South America", "Americas"),
    ("Northern America", "Americas"),
    ("Central Asia", "Asia"),
    ("Eastern Asia", "Asia"),
    ("South-eastern Asia", "Asia"),
    ("Southern Asia", "Asia"),
    ("Western Asia", "Asia"),
    ("Eastern Europe", "Europe"),
    ("Northern Europe", "Europe"),
    ("Southern Europe", "Europe"),
    ("Western Europe", "Europe"),
    ("Australia and New Zealand", "Oceania"),
    ("Melanesia", "Oceania"),
    ("Micronesia", "Oceania"),
    ("Polynesia", "Oceania"),
];

const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// (spelling, quarter) pairs; FAO files use the en-dash (U+2013) abbreviations
const SEASONS: &[(&str, u8)] = &[
    ("December-January-February", 1),
    ("March-April-May", 2),
    ("June-July-August", 3),
    ("September-October-November", 4),
    ("Dec\u{2013}Jan\u{2013}Feb", 1),
    ("Mar\u{2013}Apr\u{2013}May", 2),
    ("Jun\u{2013}Jul\u{2013}Aug", 3),
    ("Sep\u{2013}Oct\u{2013}Nov", 4),
];

const ANNUAL: &[&str] = &["Meteorological year"];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for ClassificationTables {
    fn default() -> Self {
        Self {
            world: owned(WORLD),
            continents: owned(CONTINENTS),
            subregions: SUBREGIONS.iter().map(|(s, _)| s.to_string()).collect(),
            subregion_continents: SUBREGIONS
                .iter()
                .map(|(s, c)| (s.to_string(), c.to_string()))
                .collect(),
            months: owned(MONTHS),
            seasons: SEASONS.iter().map(|(s, _)| s.to_string()).collect(),
            annual: owned(ANNUAL),
            month_numbers: MONTHS
                .iter()
                .enumerate()
                .map(|(i, m)| (m.to_string(), i as u8 + 1))
                .collect(),
            season_quarters: SEASONS
                .iter()
                .map(|(s, q)| (s.to_string(), *q))
                .collect(),
        }
    }
}

impl ClassificationTables {
    /// Check internal consistency of the tables.
    pub fn validate(&self) -> CoreResult<()> {
        if self.world.is_empty() {
            return Err(invalid("classification.world must name at least one area"));
        }
        if self.months.is_empty() && self.seasons.is_empty() && self.annual.is_empty() {
            return Err(invalid("classification defines no period names"));
        }

        unique_across(&[
            ("world", self.world.as_slice()),
            ("continents", self.continents.as_slice()),
            ("subregions", self.subregions.as_slice()),
        ])?;
        unique_across(&[
            ("months", self.months.as_slice()),
            ("seasons", self.seasons.as_slice()),
            ("annual", self.annual.as_slice()),
        ])?;

        for (subregion, continent) in &self.subregion_continents {
            if !self.continents.contains(continent) {
                return Err(invalid(format!(
                    "subregion '{subregion}' maps to '{continent}', which is not a configured continent"
                )));
            }
            if !self.subregions.contains(subregion) {
                return Err(invalid(format!(
                    "subregion_continents names '{subregion}', which is not listed in subregions"
                )));
            }
        }

        for month in &self.months {
            match self.month_numbers.get(month) {
                Some(n) if (1..=12).contains(n) => {}
                Some(n) => {
                    return Err(invalid(format!(
                        "month '{month}' has number {n}, expected 1..=12"
                    )))
                }
                None => return Err(invalid(format!("month '{month}' has no month number"))),
            }
        }

        for season in &self.seasons {
            match self.season_quarters.get(season) {
                Some(q) if (1..=4).contains(q) => {}
                Some(q) => {
                    return Err(invalid(format!(
                        "season '{season}' has quarter {q}, expected 1..=4"
                    )))
                }
                None => return Err(invalid(format!("season '{season}' has no quarter"))),
            }
        }

        Ok(())
    }
}

/// Fail if a name appears in more than one of the given levels
fn unique_across(levels: &[(&str, &[String])]) -> CoreResult<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for &(level, names) in levels {
        for name in names {
            if let Some(first) = seen.insert(name.as_str(), level) {
                if first != level {
                    return Err(invalid(format!(
                        "'{name}' is listed in both {first} and {level}"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.into(),
    }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
