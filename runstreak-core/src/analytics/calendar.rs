//! Calendar generation
//!
//! Produces one dense reference row per date from the earliest logged date
//! through today, with derived date parts to support time-grouped reporting
//! joins. This is a direct date-range iteration; the date parts are pure
//! functions of the date.

use crate::error::{Error, Result};
use crate::types::CalendarRow;
use chrono::{Datelike, NaiveDate};

/// Derive the calendar row for a single date.
///
/// `week` and `week_of_year` use ISO week numbering, `year_week` combines
/// the ISO year and week (e.g. 202301), and `day_of_week` runs
/// 0=Sunday..6=Saturday.
pub fn calendar_row(date: NaiveDate) -> CalendarRow {
    let iso = date.iso_week();
    CalendarRow {
        date,
        year: date.year(),
        month: date.month(),
        day: date.day(),
        day_of_year: date.ordinal(),
        day_of_month: date.day(),
        day_of_week: date.weekday().num_days_from_sunday(),
        week: iso.week(),
        week_of_year: iso.week(),
        year_week: iso.year() * 100 + iso.week() as i32,
        quarter: (date.month() - 1) / 3 + 1,
    }
}

/// Generate calendar rows for every date in `[start, end]` inclusive.
///
/// `start` is the minimum logged date and `end` is today at run time; an
/// inverted range means every logged date is in the future, which is treated
/// as corrupt input rather than an empty report.
pub fn generate_calendar(start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarRow>> {
    if start > end {
        return Err(Error::InvalidCalendarRange { start, end });
    }

    let days = (end - start).num_days() as usize + 1;
    let mut rows = Vec::with_capacity(days);
    let mut date = start;
    while date <= end {
        rows.push(calendar_row(date));
        // succ_opt only fails at NaiveDate::MAX, far beyond any log date
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    Ok(rows)
}
