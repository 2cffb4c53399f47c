use super::*;

fn global(config: Option<&Path>, database: Option<&str>) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        config: config.map(Path::to_path_buf),
        database: database.map(str::to_string),
    }
}

fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let path = dir.join("climate-warehouse.yml");
    std::fs::write(
        &path,
        format!(
            "inputs:\n  main_csv: main.csv\n  area_codes_csv: areas.csv\n  elements_csv: elements.csv\n{extra}"
        ),
    )
    .unwrap();
    path
}

#[test]
fn database_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "database:\n  path: wh.duckdb\n");

    let config = load_config(&global(Some(&path), None)).unwrap();
    assert_eq!(
        Path::new(&config.database.path),
        dir.path().join("wh.duckdb")
    );

    let config = load_config(&global(Some(&path), Some(":memory:"))).unwrap();
    assert_eq!(config.database.path, ":memory:");
}

#[test]
fn missing_config_has_context() {
    let err = load_config(&global(Some(Path::new("/nonexistent/cw.yml")), None)).unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn log_level_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "log_level: warn\n");
    let config = load_config(&global(Some(&path), None)).unwrap();

    assert_eq!(log_level(&global(None, None), None), log::LevelFilter::Info);
    assert_eq!(
        log_level(&global(None, None), Some(&config)),
        log::LevelFilter::Warn
    );
    let verbose = GlobalArgs {
        verbose: true,
        ..global(None, None)
    };
    assert_eq!(log_level(&verbose, Some(&config)), log::LevelFilter::Debug);
}

#[test]
fn table_columns_align() {
    let table = format_table(
        &["TABLE", "ROWS"],
        &[
            vec!["Areas".to_string(), "4".to_string()],
            vec!["Time Periods".to_string(), "17".to_string()],
        ],
    );
    assert_eq!(
        table,
        "TABLE         ROWS\n------------  ----\nAreas         4\nTime Periods  17"
    );
}

#[test]
fn json_results_create_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("target").join("run.json");
    write_json_results(&path, &serde_json::json!({ "facts": 3 })).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"facts\": 3"));
}

#[test]
fn reference_summary() {
    let mut check = ReferenceCheck::default();
    assert_eq!(
        describe_reference(&check),
        "all codes found in the reference files"
    );
    check.unknown_area_codes.insert("9".to_string());
    assert_eq!(
        describe_reference(&check),
        "1 unknown area codes, 0 unknown element codes"
    );
}
