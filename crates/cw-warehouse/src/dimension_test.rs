use super::*;
use crate::test_support::{hierarchy_records, record, record_for};

#[test]
fn identical_area_attributes_collapse_to_one_row() {
    let records = vec![
        record("2", "'004", "Afghanistan", 2000, 0.1),
        record("2", "'004", "Afghanistan", 2001, 0.2),
    ];
    let rows = area_rows(&records, true).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].area_key, 1);
    assert_eq!(rows[0].area_type, AreaType::Country);
    assert_eq!(rows[0].parent_area_key, None);
}

#[test]
fn keys_follow_first_appearance() {
    let rows = area_rows(&hierarchy_records(), true).unwrap();
    let names: Vec<_> = rows.iter().map(|r| (r.area_key, r.area_name.as_str())).collect();
    assert_eq!(
        names,
        vec![
            (1, "World"),
            (2, "Africa"),
            (3, "Eastern Africa"),
            (4, "Afghanistan")
        ]
    );
}

#[test]
fn period_rows_carry_month_and_quarter() {
    let records = vec![
        record_for("1", "'001", "World", "7001", "January", 2000, None),
        record_for("1", "'001", "World", "7017", "Mar\u{2013}Apr\u{2013}May", 2000, None),
        record_for("1", "'001", "World", "7020", "Meteorological year", 2000, None),
        record_for("1", "'001", "World", "7001", "January", 2001, None),
    ];
    let rows = period_rows(&records, true).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].month_number, Some(1));
    assert_eq!(rows[1].period_type, PeriodType::Season);
    assert_eq!(rows[1].quarter, Some(2));
    assert_eq!(rows[2].period_type, PeriodType::Annual);
    assert_eq!(rows[2].month_number, None);
}

#[test]
fn conflicting_natural_key_is_fatal_when_strict() {
    let records = vec![
        record("2", "'004", "Afghanistan", 2000, 0.1),
        record("2", "'004", "Afghanistan, Islamic Rep.", 2000, 0.1),
    ];
    let err = area_rows(&records, true).unwrap_err();
    match err {
        WarehouseError::NaturalKeyConflict { dimension, keys } => {
            assert_eq!(dimension, DIM_AREA);
            assert_eq!(keys, vec!["'004".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn conflicting_natural_key_keeps_first_when_lenient() {
    let records = vec![
        record("2", "'004", "Afghanistan", 2000, 0.1),
        record("2", "'004", "Afghanistan, Islamic Rep.", 2000, 0.1),
        record("3", "'008", "Albania", 2000, 0.1),
    ];
    let rows = area_rows(&records, false).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].area_name, "Afghanistan");
    assert_eq!(rows[1].area_key, 2);
}

#[test]
fn conflicting_keys_lists_each_key_once() {
    let tuples = vec![("a", 1), ("b", 1), ("a", 2), ("a", 3)];
    assert_eq!(conflicting_keys(&tuples, |t| t.0), vec!["a".to_string()]);
}

#[test]
fn load_dimensions_writes_tables() {
    let wh = Warehouse::open_memory().unwrap();
    let dims = load_dimensions(&wh, &hierarchy_records(), true).unwrap();
    assert_eq!(dims.areas.len(), 4);
    assert_eq!(dims.periods.len(), 1);
    assert_eq!(dims.metrics.len(), 1);
    assert_eq!(wh.row_count(DIM_AREA).unwrap(), 4);
    assert_eq!(wh.row_count(DIM_TIME_PERIOD).unwrap(), 1);
    assert_eq!(wh.row_count(DIM_METRIC).unwrap(), 1);

    let area_type: String = wh
        .conn()
        .query_row(
            "SELECT area_type FROM core.dim_area WHERE m49_code = '''014'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(area_type, "subregion");
}

#[test]
fn reload_replaces_rows() {
    let wh = Warehouse::open_memory().unwrap();
    load_dimensions(&wh, &hierarchy_records(), true).unwrap();
    load_dimensions(&wh, &hierarchy_records()[..2], true).unwrap();
    assert_eq!(wh.row_count(DIM_AREA).unwrap(), 2);
}

#[test]
fn strict_conflict_leaves_table_untouched() {
    let wh = Warehouse::open_memory().unwrap();
    load_dim_area(&wh, &hierarchy_records(), true).unwrap();

    let records = vec![
        record("2", "'004", "Afghanistan", 2000, 0.1),
        record("2", "'004", "Kabul", 2000, 0.1),
    ];
    assert!(load_dim_area(&wh, &records, true).is_err());
    assert_eq!(wh.row_count(DIM_AREA).unwrap(), 4);
}
