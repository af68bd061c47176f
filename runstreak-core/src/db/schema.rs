//! Table definitions
//!
//! Every table is rebuilt from scratch on each load (drop + create), so
//! there is no migration chain; the DDL below is the whole schema.
//!
//! Dates are stored as ISO-8601 `TEXT` (`YYYY-MM-DD`), which sorts and
//! compares correctly in SQLite.

/// Static unit-to-miles conversion reference table.
pub const CREATE_UNIT_CONVERSION: &str = r#"
    CREATE TABLE IF NOT EXISTS unit_conversion (
        unit               TEXT PRIMARY KEY,
        conversion_factor  REAL NOT NULL
    );
"#;

/// Canonical per-activity log rows (Layer 1).
pub const CREATE_LOG: &str = r#"
    CREATE TABLE IF NOT EXISTS log (
        date              TEXT NOT NULL,
        category          TEXT,
        distance          REAL NOT NULL,
        distance_unit     TEXT NOT NULL,
        distance_miles    REAL NOT NULL,
        duration_seconds  INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_log_date ON log(date);
"#;

/// Daily aggregates with streak assignment (Layer 2).
pub const CREATE_DAILY_LOG: &str = r#"
    CREATE TABLE IF NOT EXISTS daily_log (
        date              TEXT PRIMARY KEY,
        streak_id         INTEGER NOT NULL,
        streak_day        INTEGER NOT NULL,
        distance_miles    REAL NOT NULL,
        duration_seconds  INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_daily_log_streak ON daily_log(streak_id);
"#;

/// Dense per-date reference table (Layer 2).
pub const CREATE_CALENDAR: &str = r#"
    CREATE TABLE IF NOT EXISTS calendar (
        date          TEXT PRIMARY KEY,
        year          INTEGER NOT NULL,
        month         INTEGER NOT NULL,
        day           INTEGER NOT NULL,
        day_of_year   INTEGER NOT NULL,
        day_of_month  INTEGER NOT NULL,
        day_of_week   INTEGER NOT NULL,
        week          INTEGER NOT NULL,
        week_of_year  INTEGER NOT NULL,
        year_week     INTEGER NOT NULL,
        quarter       INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_calendar_year ON calendar(year);
"#;

/// All tables, as (name, create DDL) pairs.
pub const TABLES: &[(&str, &str)] = &[
    ("unit_conversion", CREATE_UNIT_CONVERSION),
    ("log", CREATE_LOG),
    ("daily_log", CREATE_DAILY_LOG),
    ("calendar", CREATE_CALENDAR),
];

/// SQL that atomically replaces a table: drop it, then recreate it empty.
pub fn replace_sql(table: &str, create: &str) -> String {
    format!("DROP TABLE IF EXISTS {};\n{}", table, create)
}
