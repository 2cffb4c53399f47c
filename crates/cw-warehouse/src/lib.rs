//! cw-warehouse - DuckDB star-schema warehouse for climate-warehouse
//!
//! Owns the warehouse connection and its embedded DDL migrations, and loads
//! classified records through staging into the area, time period and metric
//! dimensions and the temperature fact table.

pub mod connection;
pub mod ddl;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod hierarchy;
pub mod load;
pub mod migration;
pub mod refresh;
pub mod staging;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use connection::Warehouse;
pub use error::{WarehouseError, WarehouseResult};
pub use fact::FactReport;
pub use load::{connect, load_warehouse, LoadReport, LoadStep};
pub use refresh::{AggregateRefresh, AnalyticsRefresh};
pub use stats::TableCounts;
