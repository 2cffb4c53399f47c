//! Error types for the warehouse.

use crate::load::LoadStep;
use cw_core::CoreError;
use thiserror::Error;

/// Warehouse errors.
#[derive(Error, Debug)]
pub enum WarehouseError {
    /// Failed to open or reach the warehouse database (W001).
    #[error("[W001] Warehouse connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration failed (W002).
    #[error("[W002] Warehouse migration failed: {0}")]
    MigrationError(String),

    /// SQL execution error (W003).
    #[error("[W003] Warehouse query failed: {0}")]
    QueryError(String),

    /// Transaction management error (W004).
    #[error("[W004] Warehouse transaction failed: {0}")]
    TransactionError(String),

    /// Rows could not be inserted or updated (W005).
    #[error("[W005] Warehouse load failed: {0}")]
    LoadError(String),

    /// A natural key maps to more than one dimension row (W006).
    #[error("[W006] {dimension} has {} natural keys with conflicting attributes: {}", .keys.len(), .keys.join(", "))]
    NaturalKeyConflict { dimension: String, keys: Vec<String> },

    /// Aggregate refresh failed (W007).
    #[error("[W007] Aggregate refresh '{name}' failed: {message}")]
    RefreshError { name: String, message: String },

    /// A pipeline step failed; the warehouse keeps whatever earlier steps committed (W008).
    #[error("[W008] Load step {step} failed: {source}")]
    StepFailed {
        step: LoadStep,
        #[source]
        source: Box<WarehouseError>,
    },

    /// Classification or configuration error raised while loading (W009).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// DuckDB driver error with preserved source chain (W010).
    #[error("[W010] DuckDB error")]
    DuckDb(#[source] duckdb::Error),
}

impl WarehouseError {
    /// The innermost error, looking through [`WarehouseError::StepFailed`]
    pub fn root(&self) -> &WarehouseError {
        match self {
            WarehouseError::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// The step a [`WarehouseError::StepFailed`] occurred in
    pub fn step(&self) -> Option<LoadStep> {
        match self {
            WarehouseError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Result type alias for [`WarehouseError`].
pub type WarehouseResult<T> = Result<T, WarehouseError>;

impl From<duckdb::Error> for WarehouseError {
    fn from(err: duckdb::Error) -> Self {
        WarehouseError::DuckDb(err)
    }
}

/// Attach a short description of the failing statement to DuckDB errors.
pub(crate) trait DbContext<T> {
    fn db_context(self, what: &str) -> WarehouseResult<T>;
}

impl<T> DbContext<T> for Result<T, duckdb::Error> {
    fn db_context(self, what: &str) -> WarehouseResult<T> {
        self.map_err(|e| WarehouseError::QueryError(format!("{what}: {e}")))
    }
}
