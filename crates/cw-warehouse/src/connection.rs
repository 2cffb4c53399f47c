//! Warehouse connection wrapper.
//!
//! [`Warehouse`] owns a DuckDB [`Connection`] and provides helpers for
//! opening, migrating, and transacting against the warehouse database.

use crate::error::{DbContext, WarehouseError, WarehouseResult};
use crate::migration::run_migrations;
use duckdb::Connection;
use std::path::Path;

/// Database path that selects an in-memory warehouse
pub const MEMORY_PATH: &str = ":memory:";

/// Tables the loader is allowed to truncate
pub(crate) const LOADED_TABLES: &[&str] = &[
    "staging.raw_temperature",
    "core.dim_area",
    "core.dim_time_period",
    "core.dim_metric",
    "core.fact_temperature",
];

/// Run `body` between `BEGIN` and `COMMIT`.
///
/// Any error from `body` or from the commit rolls the transaction back and is
/// returned unchanged.
pub(crate) fn with_transaction<F, T>(conn: &Connection, body: F) -> WarehouseResult<T>
where
    F: FnOnce(&Connection) -> WarehouseResult<T>,
{
    conn.execute_batch("BEGIN TRANSACTION")
        .map_err(|e| WarehouseError::TransactionError(format!("BEGIN failed: {e}")))?;

    let outcome = body(conn).and_then(|value| {
        conn.execute_batch("COMMIT")
            .map(|()| value)
            .map_err(|e| WarehouseError::TransactionError(format!("COMMIT failed: {e}")))
    });
    if let Err(err) = &outcome {
        log::debug!("Rolling back: {err}");
        let _ = conn.execute_batch("ROLLBACK");
    }
    outcome
}

/// Wrapper around a DuckDB connection to the warehouse.
///
/// Single-threaded: every load step runs sequentially on one connection.
pub struct Warehouse {
    conn: Connection,
}

impl Warehouse {
    /// Open a warehouse from a configured path, `:memory:` included.
    pub fn new(path: &str) -> WarehouseResult<Self> {
        if path == MEMORY_PATH {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Open (or create) the warehouse at `path` and run pending migrations.
    pub fn open(path: &Path) -> WarehouseResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| WarehouseError::ConnectionError(format!("{e}: {}", path.display())))?;
        run_migrations(&conn)?;
        log::debug!("Opened warehouse at {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory warehouse with all migrations applied.
    pub fn open_memory() -> WarehouseResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| WarehouseError::ConnectionError(e.to_string()))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Confirm the connection answers queries, returning the DuckDB version.
    pub fn ping(&self) -> WarehouseResult<String> {
        let version: String = self
            .conn
            .query_row("SELECT version()", [], |row| row.get(0))
            .map_err(|e| WarehouseError::ConnectionError(e.to_string()))?;
        log::info!("Connected to DuckDB {version}");
        Ok(version)
    }

    /// Run `body` in one transaction on the warehouse connection.
    pub fn transaction<F, T>(&self, body: F) -> WarehouseResult<T>
    where
        F: FnOnce(&Connection) -> WarehouseResult<T>,
    {
        with_transaction(&self.conn, body)
    }

    /// Remove every row from one of the loaded tables.
    ///
    /// Runs in auto-commit mode so the following insert transaction sees an
    /// empty table.
    pub fn truncate(&self, table: &str) -> WarehouseResult<usize> {
        if !LOADED_TABLES.contains(&table) {
            return Err(WarehouseError::QueryError(format!(
                "refusing to truncate unknown table '{table}'"
            )));
        }
        let removed = self
            .conn
            .execute(&format!("DELETE FROM {table}"), [])
            .db_context(&format!("truncate {table}"))?;
        log::debug!("Truncated {table} ({removed} rows)");
        Ok(removed)
    }

    /// Row count of a single table
    pub fn row_count(&self, table: &str) -> WarehouseResult<i64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .db_context(&format!("count {table}"))
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
