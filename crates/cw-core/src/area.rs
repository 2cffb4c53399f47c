//! Geographic area classification.

use crate::tables::{AreaType, ClassificationTables};

/// Parent name returned for every continent
pub const WORLD_AREA: &str = "World";

/// Classifies area names into the world → continent → subregion → country tree
#[derive(Debug, Clone, Copy)]
pub struct AreaClassifier<'a> {
    tables: &'a ClassificationTables,
}

impl<'a> AreaClassifier<'a> {
    /// Create a classifier over the given tables
    pub fn new(tables: &'a ClassificationTables) -> Self {
        Self { tables }
    }

    /// Classify an area name.
    ///
    /// Never fails: names outside the world, continent and subregion lists are
    /// treated as countries.
    pub fn classify_area(&self, name: &str) -> AreaType {
        let name = name.trim();
        if contains(&self.tables.world, name) {
            AreaType::World
        } else if contains(&self.tables.continents, name) {
            AreaType::Continent
        } else if contains(&self.tables.subregions, name) {
            AreaType::Subregion
        } else {
            AreaType::Country
        }
    }

    /// Name of the parent area, if the hierarchy defines one.
    ///
    /// Countries return `None`: country → subregion membership is not part of
    /// the classification tables.
    pub fn get_parent_area(&self, name: &str, area_type: AreaType) -> Option<&'a str> {
        match area_type {
            AreaType::World | AreaType::Country => None,
            AreaType::Continent => Some(WORLD_AREA),
            AreaType::Subregion => self
                .tables
                .subregion_continents
                .get(name.trim())
                .map(String::as_str),
        }
    }
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n == name)
}

#[cfg(test)]
#[path = "area_test.rs"]
mod tests;
