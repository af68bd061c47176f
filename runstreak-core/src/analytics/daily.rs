//! Daily aggregation
//!
//! Collapses per-activity records into one row per date, summing converted
//! distance and duration. Input order does not matter; output is sorted by
//! date ascending, which the streak detector relies on.

use crate::types::{ActivityRecord, DailyAggregate};
use std::collections::BTreeMap;

/// Group activity records by date, summing distance and duration.
///
/// Dates with no records are simply absent; calendar density is
/// reintroduced only by the calendar generator for reporting joins.
pub fn aggregate_daily(records: &[ActivityRecord]) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<chrono::NaiveDate, (f64, i64)> = BTreeMap::new();

    for record in records {
        let entry = by_date.entry(record.date).or_insert((0.0, 0));
        entry.0 += record.distance_miles;
        entry.1 += record.duration_seconds;
    }

    by_date
        .into_iter()
        .map(|(date, (distance_miles, duration_seconds))| DailyAggregate {
            date,
            distance_miles,
            duration_seconds,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, miles: f64, secs: i64) -> ActivityRecord {
        ActivityRecord {
            date: date.parse().unwrap(),
            category: None,
            distance: miles,
            distance_unit: "Mile".to_string(),
            distance_miles: miles,
            duration_seconds: secs,
        }
    }

    #[test]
    fn test_sums_same_day_records() {
        let records = vec![
            record("2023-01-01", 3.0, 1800),
            record("2023-01-01", 2.0, 1200),
            record("2023-01-02", 4.0, 2400),
        ];

        let daily = aggregate_daily(&records);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(daily[0].distance_miles, 5.0);
        assert_eq!(daily[0].duration_seconds, 3000);
        assert_eq!(daily[1].distance_miles, 4.0);
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let records = vec![
            record("2023-03-10", 1.0, 600),
            record("2023-01-05", 2.0, 1200),
            record("2023-02-20", 3.0, 1800),
        ];

        let daily = aggregate_daily(&records);
        let dates: Vec<_> = daily.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_zero_distance_record_still_produces_a_day() {
        // An unconvertible-unit record contributes 0 miles but keeps its day
        let daily = aggregate_daily(&[record("2023-01-01", 0.0, 1800)]);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].distance_miles, 0.0);
        assert_eq!(daily[0].duration_seconds, 1800);
    }
}
