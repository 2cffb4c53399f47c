//! Load orchestration.
//!
//! The run is a fixed sequence of steps. Each step commits on its own and the
//! run as a whole is not transactional: a failure leaves whatever earlier
//! steps wrote until the next successful run replaces it.

use crate::connection::Warehouse;
use crate::dimension::load_dimensions;
use crate::error::{WarehouseError, WarehouseResult};
use crate::fact::{load_facts, FactReport};
use crate::hierarchy::update_area_hierarchy;
use crate::refresh::{run_refresh, AggregateRefresh};
use crate::staging::{load_staging, truncate_staging};
use crate::stats::TableCounts;
use cw_core::config::LoadConfig;
use cw_core::{ClassificationTables, ClassifiedRecord};
use std::fmt;

/// Steps of a load run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStep {
    Connect,
    TruncateStage,
    LoadStage,
    LoadDimensions,
    ResolveHierarchy,
    LoadFacts,
    RefreshAggregates,
    ReportCounts,
}

impl LoadStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStep::Connect => "connect",
            LoadStep::TruncateStage => "truncate_stage",
            LoadStep::LoadStage => "load_stage",
            LoadStep::LoadDimensions => "load_dimensions",
            LoadStep::ResolveHierarchy => "resolve_hierarchy",
            LoadStep::LoadFacts => "load_facts",
            LoadStep::RefreshAggregates => "refresh_aggregates",
            LoadStep::ReportCounts => "report_counts",
        }
    }
}

impl fmt::Display for LoadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub staged: usize,
    pub areas: usize,
    pub periods: usize,
    pub metrics: usize,
    pub parent_links: usize,
    /// Continents or subregions left without a parent
    pub unresolved_parents: Vec<String>,
    pub facts: FactReport,
    /// Name of the aggregate refresh that ran, if any
    pub refreshed: Option<String>,
    pub counts: TableCounts,
}

/// Run `body` as `step`, tagging any error with the step
fn run_step<T>(step: LoadStep, body: impl FnOnce() -> WarehouseResult<T>) -> WarehouseResult<T> {
    log::info!("Step {step}");
    body().map_err(|e| WarehouseError::StepFailed {
        step,
        source: Box::new(e),
    })
}

/// Open the configured warehouse as the connect step of a run
pub fn connect(path: &str) -> WarehouseResult<Warehouse> {
    run_step(LoadStep::Connect, || {
        let wh = Warehouse::new(path)?;
        wh.ping()?;
        Ok(wh)
    })
}

/// Load classified records into an open warehouse.
///
/// `refresh` runs after the facts when given and `config.refresh_aggregates`
/// is set.
pub fn load_warehouse(
    wh: &Warehouse,
    records: &[ClassifiedRecord],
    config: &LoadConfig,
    tables: &ClassificationTables,
    refresh: Option<&dyn AggregateRefresh>,
) -> WarehouseResult<LoadReport> {
    let mut report = LoadReport::default();

    run_step(LoadStep::Connect, || wh.ping().map(|_| ()))?;
    run_step(LoadStep::TruncateStage, || truncate_staging(wh))?;
    report.staged = run_step(LoadStep::LoadStage, || {
        load_staging(wh, records, config.batch_size)
    })?;

    let mut dims = run_step(LoadStep::LoadDimensions, || {
        load_dimensions(wh, records, config.strict_natural_keys)
    })?;
    report.areas = dims.areas.len();
    report.periods = dims.periods.len();
    report.metrics = dims.metrics.len();

    let patch = run_step(LoadStep::ResolveHierarchy, || {
        update_area_hierarchy(wh, &mut dims.areas, tables)
    })?;
    report.parent_links = patch.links.len();
    report.unresolved_parents = patch.unresolved;

    report.facts = run_step(LoadStep::LoadFacts, || load_facts(wh))?;

    match refresh {
        Some(refresh) if config.refresh_aggregates => {
            run_step(LoadStep::RefreshAggregates, || run_refresh(wh, refresh))?;
            report.refreshed = Some(refresh.name().to_string());
        }
        _ => log::info!("Skipping aggregate refresh"),
    }

    report.counts = run_step(LoadStep::ReportCounts, || wh.table_counts())?;
    for (label, count) in report.counts.labelled() {
        log::info!("{label}: {count} rows");
    }
    Ok(report)
}

#[cfg(test)]
#[path = "load_test.rs"]
mod tests;
