//! Warehouse schema migrations.
//!
//! Applied versions are recorded in `core.schema_version`. A migration's DDL
//! and its version row commit together, so the recorded version always
//! matches the schema that exists.

use crate::connection::with_transaction;
use crate::ddl::{Migration, MIGRATIONS};
use crate::error::{WarehouseError, WarehouseResult};
use duckdb::Connection;

const CREATE_VERSION_TABLE: &str = "
CREATE SCHEMA IF NOT EXISTS core;
CREATE TABLE IF NOT EXISTS core.schema_version (
    version    INTEGER NOT NULL,
    applied_at TIMESTAMP NOT NULL DEFAULT now()
);";

/// Highest applied migration version, 0 for a fresh database
pub fn current_version(conn: &Connection) -> WarehouseResult<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM core.schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| WarehouseError::MigrationError(format!("cannot read schema version: {e}")))
}

/// Bring the warehouse schema up to the latest embedded migration.
pub fn run_migrations(conn: &Connection) -> WarehouseResult<()> {
    apply_migrations(conn, MIGRATIONS)
}

/// Apply every migration in `migrations` newer than the recorded version.
///
/// Each migration runs in its own transaction; a failure leaves the schema
/// and `core.schema_version` at the last migration that succeeded.
pub(crate) fn apply_migrations(conn: &Connection, migrations: &[Migration]) -> WarehouseResult<()> {
    conn.execute_batch(CREATE_VERSION_TABLE).map_err(|e| {
        WarehouseError::MigrationError(format!("cannot create core.schema_version: {e}"))
    })?;

    let applied = current_version(conn)?;
    let pending = migrations.iter().filter(|m| m.version > applied);
    for migration in pending {
        let label = format!("v{:03}", migration.version);
        log::debug!("Applying warehouse migration {label}");
        with_transaction(conn, |conn| {
            conn.execute_batch(migration.sql).map_err(|e| {
                WarehouseError::MigrationError(format!("migration {label} failed: {e}"))
            })?;
            conn.execute(
                "INSERT INTO core.schema_version (version) VALUES (?)",
                [migration.version],
            )
            .map_err(|e| {
                WarehouseError::MigrationError(format!("cannot record migration {label}: {e}"))
            })?;
            Ok(())
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
