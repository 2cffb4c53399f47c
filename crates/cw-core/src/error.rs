//! Error types for cw-core

use thiserror::Error;

/// Core error type for climate-warehouse
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Period name not present in any period list
    #[error("[C003] Unknown period name: '{name}'")]
    UnrecognizedPeriod { name: String },

    /// C004: Year column label that does not follow the `Y<year>` convention
    #[error("[C004] Invalid year column '{column}': expected 'Y' followed by a year")]
    InvalidYearColumn { column: String },

    /// C005: One or more required input files are missing
    #[error("[C005] Required input files are missing: {missing}")]
    InputMissing { missing: String },

    /// C006: Input file lacks a required column
    #[error("[C006] Missing column '{column}' in {path}")]
    MissingColumn { path: String, column: String },

    /// C007: Measurement cell that is neither empty nor numeric
    #[error("[C007] Invalid value '{value}' in column '{column}' at line {line} of {path}")]
    InvalidValue {
        path: String,
        line: u64,
        column: String,
        value: String,
    },

    /// C008: Row whose cell count disagrees with the header
    #[error("[C008] Row at line {line} of {path} has {found} cells, expected {expected}")]
    RaggedRow {
        path: String,
        line: u64,
        found: usize,
        expected: usize,
    },

    /// C009: CSV reader error with file path context
    #[error("[C009] Failed to read CSV '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    /// C010: IO error with file path context
    #[error("[C010] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C011: YAML parse error
    #[error("[C011] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
