use super::*;

#[test]
fn test_every_configured_name_matches_its_list() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    let lists = [
        (&tables.months, PeriodType::Month),
        (&tables.seasons, PeriodType::Season),
        (&tables.annual, PeriodType::Annual),
    ];
    for (names, expected) in lists {
        for name in names {
            let attrs = classifier.get_period_attributes(name).unwrap();
            assert_eq!(attrs.period_type, expected, "{name}");
        }
    }
}

#[test]
fn test_month_attributes() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    let attrs = classifier.get_period_attributes("March").unwrap();
    assert_eq!(
        attrs,
        PeriodAttributes {
            period_type: PeriodType::Month,
            month_number: Some(3),
            quarter: None,
        }
    );
    assert_eq!(classifier.get_month_number("December"), Some(12));
}

#[test]
fn test_hyphen_and_en_dash_spellings_share_a_quarter() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    let pairs = [
        ("December-January-February", "Dec\u{2013}Jan\u{2013}Feb", 1),
        ("March-April-May", "Mar\u{2013}Apr\u{2013}May", 2),
        ("June-July-August", "Jun\u{2013}Jul\u{2013}Aug", 3),
        ("September-October-November", "Sep\u{2013}Oct\u{2013}Nov", 4),
    ];
    for (hyphen, en_dash, quarter) in pairs {
        let a = classifier.get_period_attributes(hyphen).unwrap();
        let b = classifier.get_period_attributes(en_dash).unwrap();
        assert_eq!(a.period_type, PeriodType::Season);
        assert_eq!(a.quarter, Some(quarter));
        assert_eq!(a, b);
    }
}

#[test]
fn test_annual_has_no_month_or_quarter() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    let attrs = classifier
        .get_period_attributes("Meteorological year")
        .unwrap();
    assert_eq!(attrs.period_type, PeriodType::Annual);
    assert_eq!(attrs.month_number, None);
    assert_eq!(attrs.quarter, None);
}

#[test]
fn test_unknown_period_is_an_error() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    let err = classifier.classify_period("Foo").unwrap_err();
    assert!(matches!(err, CoreError::UnrecognizedPeriod { ref name } if name == "Foo"));

    assert!(classifier.get_period_attributes("Foo").is_err());
}

#[test]
fn test_classify_trims_whitespace() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    let attrs = classifier.get_period_attributes(" July ").unwrap();
    assert_eq!(attrs.period_type, PeriodType::Month);
    assert_eq!(attrs.month_number, Some(7));
}

#[test]
fn test_lookups_return_none_when_inapplicable() {
    let tables = ClassificationTables::default();
    let classifier = PeriodClassifier::new(&tables);

    assert_eq!(classifier.get_month_number("March-April-May"), None);
    assert_eq!(classifier.get_quarter("March"), None);
    assert_eq!(classifier.get_quarter("Meteorological year"), None);
}
