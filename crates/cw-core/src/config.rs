//! Configuration types and parsing for climate-warehouse.yml

use crate::error::{CoreError, CoreResult};
use crate::tables::ClassificationTables;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched by [`Config::load_from_dir`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &["climate-warehouse.yml", "climate-warehouse.yaml"];

/// Main pipeline configuration from climate-warehouse.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Input CSV files
    pub inputs: InputsConfig,

    /// Warehouse database connection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Staging batch size and load behaviour
    #[serde(default)]
    pub load: LoadConfig,

    /// Year and measurement bounds applied during transform
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Area and period classification tables
    #[serde(default)]
    pub classification: ClassificationTables,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Locations of the three input files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsConfig {
    /// Wide-format main dataset with one `Y<year>` column per year
    pub main_csv: PathBuf,

    /// Area code reference file
    pub area_codes_csv: PathBuf,

    /// Element (metric) reference file
    pub elements_csv: PathBuf,
}

impl InputsConfig {
    /// All inputs with a display label, in the order they are checked
    pub fn labelled(&self) -> [(&'static str, &Path); 3] {
        [
            ("Main CSV", self.main_csv.as_path()),
            ("Area Codes", self.area_codes_csv.as_path()),
            ("Elements", self.elements_csv.as_path()),
        ]
    }
}

/// Warehouse database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Load step configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    /// Rows per staging insert transaction
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Abort when a natural key maps to more than one dimension row
    #[serde(default = "default_true")]
    pub strict_natural_keys: bool,

    /// Rebuild the analytics tables after the fact load
    #[serde(default = "default_true")]
    pub refresh_aggregates: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            strict_natural_keys: true,
            refresh_aggregates: true,
        }
    }
}

/// Data quality bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Records before this year are dropped
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    /// Records after this year are dropped
    #[serde(default = "default_max_year")]
    pub max_year: i32,

    /// Lower bound (°C) below which temperature changes are flagged
    #[serde(default = "default_min_temp_change")]
    pub min_temp_change: f64,

    /// Upper bound (°C) above which temperature changes are flagged
    #[serde(default = "default_max_temp_change")]
    pub max_temp_change: f64,

    /// Metric name the temperature bounds apply to
    #[serde(default = "default_temperature_metric")]
    pub temperature_metric: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
            min_temp_change: default_min_temp_change(),
            max_temp_change: default_max_temp_change(),
            temperature_metric: default_temperature_metric(),
        }
    }
}

impl ValidationConfig {
    /// Reject inverted or non-finite bounds
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_year > self.max_year {
            return Err(invalid(format!(
                "validation.min_year ({}) is greater than validation.max_year ({})",
                self.min_year, self.max_year
            )));
        }
        if !self.min_temp_change.is_finite() || !self.max_temp_change.is_finite() {
            return Err(invalid("temperature change bounds must be finite numbers"));
        }
        if self.min_temp_change > self.max_temp_change {
            return Err(invalid(format!(
                "validation.min_temp_change ({}) is greater than validation.max_temp_change ({})",
                self.min_temp_change, self.max_temp_change
            )));
        }
        if self.temperature_metric.trim().is_empty() {
            return Err(invalid("validation.temperature_metric cannot be empty"));
        }
        Ok(())
    }
}

const DEFAULT_DB_PATH: &str = ":memory:";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_batch_size() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_min_year() -> i32 {
    1880
}

fn default_max_year() -> i32 {
    2200
}

fn default_min_temp_change() -> f64 {
    -20.0
}

fn default_max_temp_change() -> f64 {
    20.0
}

fn default_temperature_metric() -> String {
    "Temperature change".to_string()
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Relative input and database paths are resolved against the directory
    /// containing the file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;

        let root = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(root);
        Ok(config)
    }

    /// Load configuration from a directory containing climate-warehouse.yml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Validate the configuration.
    ///
    /// Runs before any file or database I/O.
    pub fn validate(&self) -> CoreResult<()> {
        for (label, path) in self.inputs.labelled() {
            if path.as_os_str().is_empty() {
                return Err(invalid(format!("input path for {label} cannot be empty")));
            }
        }
        if self.database.path.trim().is_empty() {
            return Err(invalid("database.path cannot be empty"));
        }
        if self.load.batch_size == 0 {
            return Err(invalid("load.batch_size must be greater than zero"));
        }
        if let Some(level) = &self.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(invalid(format!("unknown log_level '{level}'")));
            }
        }
        self.validation.validate()?;
        self.classification.validate()
    }

    /// Make relative paths absolute with respect to `root`
    pub fn resolve_paths(&mut self, root: &Path) {
        for path in [
            &mut self.inputs.main_csv,
            &mut self.inputs.area_codes_csv,
            &mut self.inputs.elements_csv,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        if self.database.path != DEFAULT_DB_PATH && Path::new(&self.database.path).is_relative()
        {
            self.database.path = root.join(&self.database.path).display().to_string();
        }
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.into(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
