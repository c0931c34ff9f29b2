use ecm_core::models::{Interval, SeriesView, TimeSeriesPoint};
use ecm_valuation::{aggregate, write_series_csv};
use rstest::*;
use time::{Date, macros::date};

fn point(date: Date, state: &str, value_type: &str, price: f64) -> TimeSeriesPoint {
    TimeSeriesPoint {
        date,
        price,
        state: state.to_owned(),
        value_type: value_type.to_owned(),
        scenario: "central".to_owned(),
        financial_year: "FY25".to_owned(),
        curve_name: "forward".to_owned(),
    }
}

#[rstest]
#[case::monthly(Interval::Monthly, "Mar 2025")]
#[case::yearly(Interval::Yearly, "2025")]
fn single_point(#[case] interval: Interval, #[case] label: &str) {
    let points = [point(date!(2025 - 03 - 15), "NSW", "base", 85.2)];
    let rows = aggregate(&points, SeriesView::State, interval);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, label);
    assert_eq!(rows[0].values.len(), 1);
    assert_eq!(rows[0].values.get("NSW"), Some(&85.2));
}

#[rstest]
#[case::mid_quarter(date!(2025 - 03 - 15), None)]
#[case::quarter_start(date!(2025 - 04 - 01), Some("Q2 2025"))]
fn single_point_quarterly(#[case] date: Date, #[case] label: Option<&str>) {
    let points = [point(date, "NSW", "base", 85.2)];
    let rows = aggregate(&points, SeriesView::State, Interval::Quarterly);

    let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, label.into_iter().collect::<Vec<_>>());
}

#[test]
fn quarters_starting_in_range() {
    let points = [
        point(date!(2025 - 05 - 20), "NSW", "base", 70.0),
        point(date!(2025 - 07 - 10), "NSW", "base", 90.0),
    ];
    let rows = aggregate(&points, SeriesView::State, Interval::Quarterly);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "Q3 2025");
    assert_eq!(rows[0].values.get("NSW"), Some(&90.0));
}

#[test]
fn bucket_means_are_rounded() {
    let points = [
        point(date!(2025 - 01 - 02), "NSW", "base", 80.0),
        point(date!(2025 - 01 - 20), "NSW", "base", 81.0),
        point(date!(2025 - 01 - 31), "NSW", "base", 81.0),
    ];
    let rows = aggregate(&points, SeriesView::State, Interval::Monthly);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values.get("NSW"), Some(&80.67));
}

#[test]
fn missing_series_are_omitted() {
    // VIC only trades in February, and nothing at all trades in March
    let points = [
        point(date!(2025 - 04 - 01), "NSW", "base", 70.0),
        point(date!(2025 - 01 - 10), "NSW", "base", 90.0),
        point(date!(2025 - 02 - 10), "VIC", "base", 75.0),
        point(date!(2025 - 02 - 11), "NSW", "base", 88.0),
    ];
    let rows = aggregate(&points, SeriesView::State, Interval::Monthly);

    let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Jan 2025", "Feb 2025", "Apr 2025"]);

    assert_eq!(rows[0].values.get("VIC"), None);
    assert_eq!(rows[1].values.get("VIC"), Some(&75.0));
    assert_eq!(rows[1].values.get("NSW"), Some(&88.0));
    assert!(rows.iter().all(|row| row.values.values().all(|v| *v != 0.0)));

    let mut csv = Vec::new();
    write_series_csv(&rows, &mut csv).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "label,NSW,VIC\nJan 2025,90,\nFeb 2025,88,75\nApr 2025,70,\n"
    );
}

#[test]
fn series_by_value_type() {
    let points = [
        point(date!(2025 - 07 - 01), "NSW", "peak", 120.0),
        point(date!(2025 - 08 - 01), "VIC", "peak", 100.0),
        point(date!(2025 - 07 - 05), "NSW", "base", 90.0),
    ];
    let rows = aggregate(&points, SeriesView::ValueType, Interval::Quarterly);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "Q3 2025");
    assert_eq!(rows[0].values.get("peak"), Some(&110.0));
    assert_eq!(rows[0].values.get("base"), Some(&90.0));
}

#[test]
fn rows_serialize_flat() {
    let points = [
        point(date!(2025 - 03 - 15), "NSW", "base", 85.2),
        point(date!(2025 - 03 - 16), "SA", "base", 92.8),
    ];
    let rows = aggregate(&points, SeriesView::State, Interval::Monthly);
    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        serde_json::json!([{"label": "Mar 2025", "NSW": 85.2, "SA": 92.8}])
    );
}
