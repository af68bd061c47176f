//! Core domain types for runstreak
//!
//! These types represent the canonical data model that normalizes the raw
//! exported training log into per-activity, per-day, and per-date rows.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **ActivityRecord** | One normalized row of the exported log, filtered to running activities |
//! | **DailyAggregate** | Per-date rollup of all activity records on that date |
//! | **Streak** | A maximal run of consecutive dates, each with >= 1 logged mile |
//! | **StreakRow** | A daily aggregate extended with its streak id and 1-based day ordinal |
//! | **CalendarRow** | One dense reference row per date with derived date parts |
//! | **StreakSummary** | Per-streak report row (query output, not persisted) |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// Distance units
// ============================================

/// Distance units the export format is known to emit.
///
/// The conversion factors to miles are fixed reference data; they are also
/// persisted to the `unit_conversion` table for ad-hoc SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Mile,
    Kilometer,
    Meter,
}

impl DistanceUnit {
    /// All known units, for seeding the conversion table.
    pub const ALL: [DistanceUnit; 3] =
        [DistanceUnit::Mile, DistanceUnit::Kilometer, DistanceUnit::Meter];

    /// Multiplicative factor converting this unit to miles.
    pub fn to_miles_factor(&self) -> f64 {
        match self {
            DistanceUnit::Mile => 1.0,
            DistanceUnit::Kilometer => 0.6213712,
            DistanceUnit::Meter => 0.0006213712,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Mile => "Mile",
            DistanceUnit::Kilometer => "Kilometer",
            DistanceUnit::Meter => "Meter",
        }
    }

    /// Parse a unit name from the export. Returns `None` for unrecognized
    /// units; callers decide the zero-fill policy (see the normalizer).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Mile" => Some(DistanceUnit::Mile),
            "Kilometer" => Some(DistanceUnit::Kilometer),
            "Meter" => Some(DistanceUnit::Meter),
            _ => None,
        }
    }
}

// ============================================
// Canonical activity records
// ============================================

/// One normalized activity row from the exported log.
///
/// Created fresh on each pipeline run and discarded after aggregation; the
/// raw distance and unit are preserved alongside the converted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Calendar date of the activity
    pub date: NaiveDate,
    /// Activity sub-category from the export (e.g. "Easy", "Race")
    pub category: Option<String>,
    /// Raw distance value as exported
    pub distance: f64,
    /// Raw distance unit name as exported
    pub distance_unit: String,
    /// Distance converted to miles (0 when the unit is unrecognized)
    pub distance_miles: f64,
    /// Duration converted to total seconds
    pub duration_seconds: i64,
}

// ============================================
// Derived rows
// ============================================

/// Per-date rollup of activity records. Dates are unique; dates with no
/// qualifying records are simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub distance_miles: f64,
    pub duration_seconds: i64,
}

/// A daily aggregate extended with streak assignment.
///
/// `streak_id` is monotonically non-decreasing in date order and constant
/// within a maximal run of consecutive qualifying dates; `streak_day` is the
/// 1-based position of the date within its streak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakRow {
    pub date: NaiveDate,
    pub streak_id: i64,
    pub streak_day: i64,
    pub distance_miles: f64,
    pub duration_seconds: i64,
}

/// One dense calendar row per date, with derived date parts.
///
/// Pure function of the date: `week` and `week_of_year` use ISO week
/// numbering, `year_week` is `iso_year * 100 + iso_week`, and `day_of_week`
/// runs 0=Sunday..6=Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRow {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub day_of_year: u32,
    pub day_of_month: u32,
    pub day_of_week: u32,
    pub week: u32,
    pub week_of_year: u32,
    pub year_week: i32,
    pub quarter: u32,
}

// ============================================
// Report rows (query output, not persisted)
// ============================================

/// Per-streak summary row for the streak report.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakSummary {
    pub streak_id: i64,
    pub start_of_streak: NaiveDate,
    pub last_day_of_streak: NaiveDate,
    /// Total miles over the streak, rounded to 2 decimals
    pub total_distance: f64,
    pub total_days: i64,
}

/// Total mileage for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyMileage {
    pub year: i32,
    /// Total miles for the year, rounded to 2 decimals
    pub total_distance: f64,
}
