//! Record builders shared by the unit tests.

use cw_core::{AreaClassifier, ClassificationTables, ClassifiedRecord, PeriodClassifier, RecordIds};

/// A classified "Temperature change" record for `area` in January
pub(crate) fn record(area_code: &str, m49: &str, area: &str, year: i32, value: f64) -> ClassifiedRecord {
    record_for(area_code, m49, area, "7001", "January", year, Some(value))
}

/// A classified record for an arbitrary area and period
pub(crate) fn record_for(
    area_code: &str,
    m49: &str,
    area: &str,
    period_code: &str,
    period: &str,
    year: i32,
    value: Option<f64>,
) -> ClassifiedRecord {
    let tables = ClassificationTables::default();
    let attrs = PeriodClassifier::new(&tables)
        .get_period_attributes(period)
        .unwrap();
    ClassifiedRecord {
        ids: RecordIds {
            area_code: area_code.to_string(),
            m49_code: m49.to_string(),
            area_name: area.to_string(),
            period_code: period_code.to_string(),
            period_name: period.to_string(),
            metric_code: "7271".to_string(),
            metric_name: "Temperature change".to_string(),
            unit: "°c".to_string(),
        },
        year,
        value,
        area_type: AreaClassifier::new(&tables).classify_area(area),
        period_type: attrs.period_type,
        month_number: attrs.month_number,
        quarter: attrs.quarter,
    }
}

/// World, Africa and Eastern Africa plus one country, one record each
pub(crate) fn hierarchy_records() -> Vec<ClassifiedRecord> {
    vec![
        record("5000", "'001", "World", 2000, 0.5),
        record("5100", "'002", "Africa", 2000, 0.6),
        record("5101", "'014", "Eastern Africa", 2000, 0.7),
        record("2", "'004", "Afghanistan", 2000, 0.8),
    ]
}
