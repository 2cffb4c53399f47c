//! cw-core - Core library for climate-warehouse
//!
//! This crate provides configuration parsing, the static classification
//! tables, the area and period classifiers, and the transform pipeline that
//! turns the wide FAO temperature dataset into classified long records.

pub mod area;
pub mod config;
pub mod error;
pub mod extract;
pub mod period;
pub mod record;
pub mod tables;
pub mod transform;
pub mod unpivot;
pub mod validate;

pub use area::AreaClassifier;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use period::{PeriodAttributes, PeriodClassifier};
pub use record::{ClassifiedRecord, LongRecord, RawRecord, RawTable, RecordIds};
pub use tables::{AreaType, ClassificationTables, PeriodType};
pub use transform::{transform, TransformOutput, TransformReport};
pub use validate::ValidationReport;
