//! Area parent hierarchy, resolved after the area rows exist.
//!
//! Continents point at the world row; subregions point at their continent as
//! named by the classification tables. Countries and unmapped subregions keep
//! a null parent.

use crate::connection::Warehouse;
use crate::dimension::AreaRow;
use crate::error::{DbContext, WarehouseResult};
use cw_core::{AreaClassifier, AreaType, ClassificationTables};

/// Parent links to write, plus the rows that could not be linked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyPatch {
    /// (area_key, parent_area_key)
    pub links: Vec<(i64, i64)>,
    /// Names of continents or subregions whose parent row is missing
    pub unresolved: Vec<String>,
}

impl HierarchyPatch {
    /// Write the links into in-memory rows
    pub fn apply(&self, rows: &mut [AreaRow]) {
        for &(key, parent) in &self.links {
            if let Some(row) = rows.iter_mut().find(|r| r.area_key == key) {
                row.parent_area_key = Some(parent);
            }
        }
    }
}

/// Key of the first row of `area_type` named `name`
fn key_of(rows: &[AreaRow], area_type: AreaType, name: &str) -> Option<i64> {
    rows.iter()
        .filter(|r| r.area_type == area_type && r.area_name.trim() == name)
        .map(|r| r.area_key)
        .min()
}

/// Work out every continent and subregion parent from the stored rows
pub fn resolve_parents(rows: &[AreaRow], areas: &AreaClassifier<'_>) -> HierarchyPatch {
    let world_key = rows
        .iter()
        .filter(|r| r.area_type == AreaType::World)
        .map(|r| r.area_key)
        .min();

    let mut patch = HierarchyPatch::default();
    for row in rows {
        let parent_key = match row.area_type {
            AreaType::World | AreaType::Country => continue,
            AreaType::Continent => world_key,
            AreaType::Subregion => areas
                .get_parent_area(&row.area_name, row.area_type)
                .and_then(|continent| key_of(rows, AreaType::Continent, continent)),
        };
        match parent_key {
            Some(parent) => patch.links.push((row.area_key, parent)),
            None => patch.unresolved.push(row.area_name.clone()),
        }
    }
    patch
}

/// Resolve parents for the loaded area rows and store them.
///
/// Updates `rows` in place and writes the same links to `core.dim_area` in one
/// transaction.
pub fn update_area_hierarchy(
    wh: &Warehouse,
    rows: &mut [AreaRow],
    tables: &ClassificationTables,
) -> WarehouseResult<HierarchyPatch> {
    let patch = resolve_parents(rows, &AreaClassifier::new(tables));

    wh.transaction(|conn| {
        let mut stmt = conn
            .prepare("UPDATE core.dim_area SET parent_area_key = ? WHERE area_key = ?")
            .db_context("prepare hierarchy update")?;
        for &(key, parent) in &patch.links {
            stmt.execute(duckdb::params![parent, key])
                .db_context("update parent_area_key")?;
        }
        Ok(())
    })?;
    patch.apply(rows);

    log::info!("Resolved {} area parent links", patch.links.len());
    if !patch.unresolved.is_empty() {
        log::warn!(
            "{} areas have no parent row: {}",
            patch.unresolved.len(),
            patch.unresolved.join(", ")
        );
    }
    Ok(patch)
}

#[cfg(test)]
#[path = "hierarchy_test.rs"]
mod tests;
