use ecm_core::models::{Interval, Map, SeriesView, TimeSeriesPoint, TimeSeriesRow};
use std::hash::Hash;
use time::Date;

mod bucket;
pub use bucket::{Bucket, Buckets, buckets};

/// Resample price points onto calendar buckets, one series per `view` tag.
pub fn aggregate(
    points: &[TimeSeriesPoint],
    view: SeriesView,
    interval: Interval,
) -> Vec<TimeSeriesRow<String>> {
    aggregate_series(
        points
            .iter()
            .map(|point| (point.series(view).to_owned(), point.date, point.price)),
        interval,
    )
}

/// Resample keyed, dated values onto calendar buckets.
///
/// Buckets tile the range from the earliest date to the latest, in
/// chronological order (see [`buckets`] for where quarters begin). Each row carries, for
/// every series with at least one value in the bucket, the mean of those
/// values rounded to two decimals. Series without values in a bucket are left
/// out of its row rather than reported as zero, and buckets where no series
/// has a value produce no row at all. Series appear in each row in the order
/// they were first encountered.
pub fn aggregate_series<K: Eq + Hash + Clone>(
    points: impl IntoIterator<Item = (K, Date, f64)>,
    interval: Interval,
) -> Vec<TimeSeriesRow<K>> {
    let mut series: Map<K, Vec<(Date, f64)>> = Map::default();
    for (key, date, value) in points {
        series.entry(key).or_default().push((date, value));
    }
    for values in series.values_mut() {
        values.sort_by_key(|(date, _)| *date);
    }

    let first = series.values().filter_map(|v| v.first()).map(|(d, _)| *d).min();
    let last = series.values().filter_map(|v| v.last()).map(|(d, _)| *d).max();
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    // every series is sorted, so each one is consumed front to back exactly once
    let mut cursors = vec![0usize; series.len()];
    let mut rows = Vec::new();

    for bucket in buckets(interval, first, last) {
        let mut values = Map::default();
        for ((key, points), cursor) in series.iter().zip(cursors.iter_mut()) {
            // points before the first quarter starting in range belong to no bucket
            while *cursor < points.len() && points[*cursor].0 < bucket.start {
                *cursor += 1;
            }
            let begin = *cursor;
            while *cursor < points.len() && bucket.contains(points[*cursor].0) {
                *cursor += 1;
            }

            let window = &points[begin..*cursor];
            if !window.is_empty() {
                let mean = window.iter().map(|(_, value)| value).sum::<f64>() / window.len() as f64;
                values.insert(key.clone(), round_cents(mean));
            }
        }

        if !values.is_empty() {
            rows.push(TimeSeriesRow {
                label: bucket.label,
                start: bucket.start,
                values,
            });
        }
    }

    rows
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn rounding() {
        assert_eq!(round_cents(85.204), 85.2);
        assert_eq!(round_cents(85.206), 85.21);
        assert_eq!(round_cents(-1.0 / 3.0), -0.33);
    }

    #[test]
    fn no_points_no_rows() {
        let rows = aggregate_series(Vec::<(&str, Date, f64)>::new(), Interval::Monthly);
        assert!(rows.is_empty());
    }

    #[test]
    fn points_before_the_first_quarter_are_skipped() {
        let rows = aggregate_series(
            [
                ("a", date!(2025 - 05 - 20), 1.0),
                ("a", date!(2025 - 07 - 01), 2.0),
                ("a", date!(2025 - 07 - 10), 4.0),
            ],
            Interval::Quarterly,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Q3 2025");
        assert_eq!(rows[0].values.get("a"), Some(&3.0));
    }

    #[test]
    fn gaps_produce_no_rows() {
        let rows = aggregate_series(
            [("a", date!(2025 - 01 - 15), 1.0), ("a", date!(2025 - 04 - 15), 2.0)],
            Interval::Monthly,
        );
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Jan 2025", "Apr 2025"]);
    }
}
