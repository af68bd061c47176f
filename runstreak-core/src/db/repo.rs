//! Database repository layer
//!
//! Provides the replace-table loads and the read-only query layer. Report
//! parameters are bound, never interpolated into SQL text.

use crate::error::{Error, Result};
use crate::types::*;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction};
use std::path::PathBuf;
use std::sync::Mutex;

/// Database handle (single connection; one pipeline run owns the store)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create any missing tables, empty.
    ///
    /// Loads always drop and recreate; this only exists so report queries on
    /// a fresh database return empty results instead of failing.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        for (_, create) in super::schema::TABLES {
            conn.execute_batch(create)?;
        }
        Ok(())
    }

    /// Run `f` inside a transaction that is committed on success.
    fn with_transaction<T>(&self, f: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    // ============================================
    // Replace-table loads
    // ============================================

    /// Rebuild `unit_conversion` from the static reference data.
    pub fn replace_unit_conversion(&self) -> Result<()> {
        self.with_transaction(|tx| {
            tx.execute_batch(&super::schema::replace_sql(
                "unit_conversion",
                super::schema::CREATE_UNIT_CONVERSION,
            ))?;
            let mut stmt =
                tx.prepare("INSERT INTO unit_conversion (unit, conversion_factor) VALUES (?1, ?2)")?;
            for unit in DistanceUnit::ALL {
                stmt.execute(params![unit.as_str(), unit.to_miles_factor()])?;
            }
            Ok(())
        })
    }

    /// Rebuild `log` from normalized activity records.
    pub fn replace_log(&self, records: &[ActivityRecord]) -> Result<()> {
        self.with_transaction(|tx| {
            tx.execute_batch(&super::schema::replace_sql("log", super::schema::CREATE_LOG))?;
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO log
                    (date, category, distance, distance_unit, distance_miles, duration_seconds)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for record in records {
                stmt.execute(params![
                    record.date.to_string(),
                    record.category,
                    record.distance,
                    record.distance_unit,
                    record.distance_miles,
                    record.duration_seconds,
                ])?;
            }
            Ok(())
        })
    }

    /// Rebuild `daily_log` from streak-annotated daily aggregates.
    pub fn replace_daily_log(&self, rows: &[StreakRow]) -> Result<()> {
        self.with_transaction(|tx| {
            tx.execute_batch(&super::schema::replace_sql(
                "daily_log",
                super::schema::CREATE_DAILY_LOG,
            ))?;
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO daily_log
                    (date, streak_id, streak_day, distance_miles, duration_seconds)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for row in rows {
                stmt.execute(params![
                    row.date.to_string(),
                    row.streak_id,
                    row.streak_day,
                    row.distance_miles,
                    row.duration_seconds,
                ])?;
            }
            Ok(())
        })
    }

    /// Rebuild `calendar` from generated calendar rows.
    pub fn replace_calendar(&self, rows: &[CalendarRow]) -> Result<()> {
        self.with_transaction(|tx| {
            tx.execute_batch(&super::schema::replace_sql(
                "calendar",
                super::schema::CREATE_CALENDAR,
            ))?;
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO calendar
                    (date, year, month, day, day_of_year, day_of_month,
                     day_of_week, week, week_of_year, year_week, quarter)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
            )?;
            for row in rows {
                stmt.execute(params![
                    row.date.to_string(),
                    row.year,
                    row.month,
                    row.day,
                    row.day_of_year,
                    row.day_of_month,
                    row.day_of_week,
                    row.week,
                    row.week_of_year,
                    row.year_week,
                    row.quarter,
                ])?;
            }
            Ok(())
        })
    }

    // ============================================
    // Query layer
    // ============================================

    /// Streaks longer than `min_days` (strict), longest first; equal-length
    /// streaks are listed earliest-ending first.
    pub fn streak_summaries(&self, min_days: i64) -> Result<Vec<StreakSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT
                streak_id,
                MIN(date) AS start_of_streak,
                MAX(date) AS last_day_of_streak,
                ROUND(SUM(distance_miles), 2) AS total_distance,
                MAX(streak_day) AS total_days
            FROM daily_log
            GROUP BY streak_id
            HAVING total_days > ?1
            ORDER BY total_days DESC, last_day_of_streak ASC
            "#,
        )?;

        let rows = stmt
            .query_map([min_days], |row| {
                Ok((
                    row.get::<_, i64>("streak_id")?,
                    row.get::<_, String>("start_of_streak")?,
                    row.get::<_, String>("last_day_of_streak")?,
                    row.get::<_, f64>("total_distance")?,
                    row.get::<_, i64>("total_days")?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(streak_id, start, last, total_distance, total_days)| {
                Ok(StreakSummary {
                    streak_id,
                    start_of_streak: parse_stored_date(&start)?,
                    last_day_of_streak: parse_stored_date(&last)?,
                    total_distance,
                    total_days,
                })
            })
            .collect()
    }

    /// Total mileage per calendar year.
    ///
    /// Inner join against the calendar: years with no logged activity
    /// contribute no row.
    pub fn yearly_mileage(&self) -> Result<Vec<YearlyMileage>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.year,
                ROUND(SUM(d.distance_miles), 2) AS total_distance
            FROM daily_log d
            INNER JOIN calendar c ON d.date = c.date
            GROUP BY c.year
            ORDER BY c.year
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(YearlyMileage {
                    year: row.get("year")?,
                    total_distance: row.get("total_distance")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// All `daily_log` rows in date order (used by tests and diagnostics).
    pub fn daily_log_rows(&self) -> Result<Vec<StreakRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT date, streak_id, streak_day, distance_miles, duration_seconds
             FROM daily_log ORDER BY date",
        )?;
        let rows = stmt
            .query_map([], Self::row_to_streak_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(date, row)| {
                Ok(StreakRow {
                    date: parse_stored_date(&date)?,
                    ..row
                })
            })
            .collect()
    }

    /// Calendar date bounds as stored, `None` when the table is empty.
    pub fn calendar_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let conn = self.conn.lock().unwrap();
        let (min, max): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM calendar",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        match (min, max) {
            (Some(min), Some(max)) => Ok(Some((
                parse_stored_date(&min)?,
                parse_stored_date(&max)?,
            ))),
            _ => Ok(None),
        }
    }

    /// Row count for a loaded table.
    pub fn table_count(&self, table: &str) -> Result<i64> {
        // Table names come from our own schema, not user input
        let conn = self.conn.lock().unwrap();
        let count =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
        Ok(count)
    }

    fn row_to_streak_row(row: &Row) -> rusqlite::Result<(String, StreakRow)> {
        Ok((
            row.get("date")?,
            StreakRow {
                date: NaiveDate::MIN,
                streak_id: row.get("streak_id")?,
                streak_day: row.get("streak_day")?,
                distance_miles: row.get("distance_miles")?,
                duration_seconds: row.get("duration_seconds")?,
            },
        ))
    }
}

fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    s.parse()
        .map_err(|e| Error::Corrupt(format!("stored date {:?} failed to parse: {}", s, e)))
}
