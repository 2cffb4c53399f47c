use crate::Warehouse;

fn count(wh: &Warehouse, sql: &str) -> i64 {
    wh.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

#[test]
fn open_memory_applies_migrations() {
    let wh = Warehouse::open_memory().unwrap();
    assert_eq!(
        count(&wh, "SELECT COUNT(*) FROM core.schema_version"),
        crate::ddl::MIGRATIONS.len() as i64
    );
    assert_eq!(wh.row_count("core.fact_temperature").unwrap(), 0);
}

#[test]
fn new_with_memory_path() {
    let wh = Warehouse::new(":memory:").unwrap();
    assert!(!wh.ping().unwrap().is_empty());
}

#[test]
fn open_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.duckdb");
    {
        let _wh = Warehouse::open(&path).unwrap();
    }
    assert!(path.exists());
    let wh = Warehouse::open(&path).unwrap();
    assert_eq!(
        count(&wh, "SELECT COUNT(*) FROM core.schema_version"),
        crate::ddl::MIGRATIONS.len() as i64
    );
}

#[test]
fn open_bad_path_is_connection_error() {
    let err = Warehouse::open(std::path::Path::new("/nonexistent/dir/wh.duckdb"))
        .err()
        .unwrap();
    assert!(matches!(err, crate::WarehouseError::ConnectionError(_)));
}

#[test]
fn transaction_rolls_back_on_error() {
    let wh = Warehouse::open_memory().unwrap();
    let result: crate::WarehouseResult<()> = wh.transaction(|conn| {
        conn.execute(
            "INSERT INTO core.dim_metric VALUES (1, '7271', 'Temperature change', '°c')",
            [],
        )?;
        Err(crate::WarehouseError::LoadError("boom".to_string()))
    });
    assert!(result.is_err());
    assert_eq!(wh.row_count("core.dim_metric").unwrap(), 0);
}

#[test]
fn transaction_commits_on_success() {
    let wh = Warehouse::open_memory().unwrap();
    wh.transaction(|conn| {
        conn.execute(
            "INSERT INTO core.dim_metric VALUES (1, '7271', 'Temperature change', '°c')",
            [],
        )?;
        Ok(())
    })
    .unwrap();
    assert_eq!(wh.row_count("core.dim_metric").unwrap(), 1);
}

#[test]
fn truncate_rejects_unknown_tables() {
    let wh = Warehouse::open_memory().unwrap();
    assert!(wh.truncate("core.schema_version").is_err());
    assert_eq!(wh.truncate("core.dim_area").unwrap(), 0);
}

#[test]
fn area_type_check_constraint() {
    let wh = Warehouse::open_memory().unwrap();
    assert!(wh
        .conn()
        .execute(
            "INSERT INTO core.dim_area VALUES (1, '1', '''001', 'World', 'planet', NULL)",
            [],
        )
        .is_err());
}
