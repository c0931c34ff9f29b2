use ecm_core::models::Interval;
use time::{Date, Month};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A half-open calendar span `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    /// The first day of the bucket
    pub start: Date,
    /// The first day of the next bucket, or None past the end of the calendar
    pub end: Option<Date>,
    /// A human-readable name for the bucket
    pub label: String,
}

impl Bucket {
    /// Whether `date` falls within the bucket
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && self.end.is_none_or(|end| date < end)
    }
}

/// Consecutive buckets of one interval, covering an inclusive date range.
#[derive(Clone, Debug)]
pub struct Buckets {
    interval: Interval,
    next: Option<Date>,
    last: Date,
}

/// The buckets covering `first..=last`.
///
/// Months and years start with the bucket holding `first`. Quarters only
/// count when their first day lies within the range, so a range opening
/// mid-quarter starts with the following quarter.
pub fn buckets(interval: Interval, first: Date, last: Date) -> Buckets {
    let next = bucket_start(interval, first).and_then(|start| match interval {
        Interval::Quarterly if start < first => next_start(interval, start),
        _ => Some(start),
    });
    Buckets {
        interval,
        next,
        last,
    }
}

impl Iterator for Buckets {
    type Item = Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next.filter(|start| *start <= self.last)?;
        let end = next_start(self.interval, start);
        self.next = end;
        Some(Bucket {
            start,
            end,
            label: label(self.interval, start),
        })
    }
}

fn bucket_start(interval: Interval, date: Date) -> Option<Date> {
    let month = match interval {
        Interval::Monthly => date.month(),
        Interval::Quarterly => {
            let index = u8::from(date.month()) - 1;
            Month::try_from(index - index % 3 + 1).ok()?
        }
        Interval::Yearly => Month::January,
    };
    Date::from_calendar_date(date.year(), month, 1).ok()
}

fn next_start(interval: Interval, start: Date) -> Option<Date> {
    let step = match interval {
        Interval::Monthly => 1,
        Interval::Quarterly => 3,
        Interval::Yearly => 12,
    };
    let index = start.year() * 12 + i32::from(u8::from(start.month()) - 1) + step;
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    Date::from_calendar_date(index.div_euclid(12), month, 1).ok()
}

fn label(interval: Interval, start: Date) -> String {
    let month = u8::from(start.month());
    match interval {
        Interval::Monthly => format!("{} {}", MONTH_LABELS[usize::from(month - 1)], start.year()),
        Interval::Quarterly => format!("Q{} {}", (month - 1) / 3 + 1, start.year()),
        Interval::Yearly => start.year().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn labels(interval: Interval, first: Date, last: Date) -> Vec<String> {
        buckets(interval, first, last).map(|b| b.label).collect()
    }

    #[test]
    fn months_cross_year_end() {
        assert_eq!(
            labels(Interval::Monthly, date!(2024 - 11 - 30), date!(2025 - 02 - 01)),
            ["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]
        );
    }

    #[test]
    fn quarters_start_on_quarter_boundaries() {
        let mut iter = buckets(Interval::Quarterly, date!(2025 - 04 - 01), date!(2025 - 07 - 01));
        let q2 = iter.next().unwrap();
        assert_eq!(q2.label, "Q2 2025");
        assert_eq!(q2.start, date!(2025 - 04 - 01));
        assert_eq!(q2.end, Some(date!(2025 - 07 - 01)));
        assert!(q2.contains(date!(2025 - 06 - 30)));
        assert!(!q2.contains(date!(2025 - 07 - 01)));
        assert_eq!(iter.next().unwrap().label, "Q3 2025");
        assert!(iter.next().is_none());
    }

    #[test]
    fn quarters_need_their_start_in_range() {
        assert_eq!(
            labels(Interval::Quarterly, date!(2025 - 05 - 20), date!(2025 - 07 - 10)),
            ["Q3 2025"]
        );
        assert!(labels(Interval::Quarterly, date!(2025 - 03 - 15), date!(2025 - 03 - 15)).is_empty());
        assert_eq!(
            labels(Interval::Quarterly, date!(2025 - 01 - 01), date!(2025 - 01 - 01)),
            ["Q1 2025"]
        );
    }

    #[test]
    fn years() {
        assert_eq!(
            labels(Interval::Yearly, date!(2025 - 07 - 01), date!(2026 - 01 - 01)),
            ["2025", "2026"]
        );
    }

    #[test]
    fn single_day_range() {
        assert_eq!(
            labels(Interval::Monthly, date!(2025 - 03 - 15), date!(2025 - 03 - 15)),
            ["Mar 2025"]
        );
    }
}
