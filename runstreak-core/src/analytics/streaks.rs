//! Streak detection
//!
//! Assigns every daily aggregate a streak id and a 1-based day ordinal.
//!
//! A day continues the current streak only when it falls exactly one day
//! after the previous logged date **and** covers at least one mile. Any date
//! gap or sub-mile day starts a new streak, so every day belongs to some
//! streak; short "streaks" of one day are normal.
//!
//! The id is the running count of breaks in date order (the first day is
//! always a break), which makes ids start at 1 and increase by exactly one
//! at each break.

use crate::types::{DailyAggregate, StreakRow};
use chrono::Duration;

/// Minimum miles for a day to extend a streak.
const QUALIFYING_MILES: f64 = 1.0;

/// Assign streak ids and day ordinals to daily aggregates.
///
/// Input must be sorted by date ascending with unique dates, which is what
/// [`aggregate_daily`](crate::analytics::aggregate_daily) produces.
pub fn detect_streaks(daily: &[DailyAggregate]) -> Vec<StreakRow> {
    let mut rows = Vec::with_capacity(daily.len());
    let mut streak_id: i64 = 0;
    let mut streak_day: i64 = 0;
    let mut prev_date = None;

    for agg in daily {
        let continues = match prev_date {
            Some(prev) => {
                agg.date - prev == Duration::days(1) && agg.distance_miles >= QUALIFYING_MILES
            }
            // First row has no predecessor and always breaks
            None => false,
        };

        if continues {
            streak_day += 1;
        } else {
            streak_id += 1;
            streak_day = 1;
        }

        rows.push(StreakRow {
            date: agg.date,
            streak_id,
            streak_day,
            distance_miles: agg.distance_miles,
            duration_seconds: agg.duration_seconds,
        });

        prev_date = Some(agg.date);
    }

    rows
}
