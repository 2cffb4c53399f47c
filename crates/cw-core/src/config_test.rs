use super::*;

const MINIMAL: &str = r#"
inputs:
  main_csv: data/temperature.csv
  area_codes_csv: data/area_codes.csv
  elements_csv: data/elements.csv
"#;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.validate().unwrap();

    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.load.batch_size, 10_000);
    assert!(config.load.strict_natural_keys);
    assert!(config.load.refresh_aggregates);
    assert_eq!(config.validation.min_year, 1880);
    assert_eq!(config.validation.max_year, 2200);
    assert_eq!(config.validation.min_temp_change, -20.0);
    assert_eq!(config.validation.max_temp_change, 20.0);
    assert_eq!(config.validation.temperature_metric, "Temperature change");
    assert_eq!(config.classification, ClassificationTables::default());
    assert_eq!(config.log_level, None);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
inputs:
  main_csv: /srv/fao/main.csv
  area_codes_csv: /srv/fao/areas.csv
  elements_csv: /srv/fao/elements.csv
database:
  path: warehouse.duckdb
load:
  batch_size: 500
  strict_natural_keys: false
  refresh_aggregates: false
validation:
  min_year: 1950
  max_year: 2030
  min_temp_change: -10.0
  max_temp_change: 10.0
log_level: debug
classification:
  annual: ["Meteorological year", "Calendar year"]
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();

    assert_eq!(config.database.path, "warehouse.duckdb");
    assert_eq!(config.load.batch_size, 500);
    assert!(!config.load.strict_natural_keys);
    assert!(!config.load.refresh_aggregates);
    assert_eq!(config.validation.min_year, 1950);
    assert_eq!(config.classification.annual.len(), 2);
    assert_eq!(config.classification.months.len(), 12);
}

#[test]
fn test_missing_inputs_is_a_parse_error() {
    let result: Result<Config, _> = serde_yaml::from_str("database:\n  path: x.duckdb\n");
    assert!(result.is_err());
}

#[test]
fn test_unknown_field_is_rejected() {
    let yaml = format!("{MINIMAL}\nbatch: 10\n");
    let result: Result<Config, _> = serde_yaml::from_str(&yaml);
    assert!(result.is_err());
}

#[test]
fn test_malformed_bound_is_a_parse_error() {
    let yaml = format!("{MINIMAL}\nvalidation:\n  min_year: early\n");
    let result: Result<Config, _> = serde_yaml::from_str(&yaml);
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_inverted_years() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.validation.min_year = 2100;
    config.validation.max_year = 1900;

    let err = config.validate().unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    assert!(err.to_string().contains("min_year"));
}

#[test]
fn test_validate_rejects_inverted_temperature_bounds() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.validation.min_temp_change = 5.0;
    config.validation.max_temp_change = -5.0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_nan_bound() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.validation.max_temp_change = f64::NAN;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_batch_size() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.load.batch_size = 0;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("batch_size"));
}

#[test]
fn test_validate_rejects_unknown_log_level() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.log_level = Some("loud".to_string());

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_input_path() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.inputs.elements_csv = PathBuf::new();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Elements"));
}

#[test]
fn test_resolve_paths_against_root() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.database.path = "warehouse.duckdb".to_string();
    let root = Path::new("/opt/climate");
    config.resolve_paths(root);

    assert_eq!(config.inputs.main_csv, root.join("data/temperature.csv"));
    assert_eq!(
        config.database.path,
        root.join("warehouse.duckdb").display().to_string()
    );
}

#[test]
fn test_resolve_paths_keeps_memory_database() {
    let mut config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    config.resolve_paths(Path::new("/opt/climate"));

    assert_eq!(config.database.path, ":memory:");
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("climate-warehouse.yml"), MINIMAL).unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(
        config.inputs.area_codes_csv,
        dir.path().join("data/area_codes.csv")
    );
}

#[test]
fn test_load_from_dir_without_config() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_validates_before_returning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("climate-warehouse.yaml");
    std::fs::write(&path, format!("{MINIMAL}\nload:\n  batch_size: 0\n")).unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}
