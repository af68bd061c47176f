//! Load pipeline for the exported training log
//!
//! Orchestrates one full ETL run:
//!
//! ```text
//! ┌──────────┐    ┌────────────┐    ┌───────────────────────┐    ┌──────────┐
//! │ Exporter │ ─► │ FileStager │ ─► │ LogParser / analytics │ ─► │ Database │
//! │ (archive)│    │ (clean TSV)│    │ (normalize, streaks)  │    │ (replace)│
//! └──────────┘    └────────────┘    └───────────────────────┘    └──────────┘
//! ```
//!
//! The run is strictly sequential: each stage fully consumes its
//! predecessor's output. Every table is rebuilt from scratch (the data
//! volume does not justify delta loading), so a failed run leaves the store
//! in its prior state and is safely re-runnable.

mod parser;

pub use parser::{LogParser, ParseOutput};

use crate::analytics::{aggregate_daily, detect_streaks, generate_calendar};
use crate::config::Config;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::staging::{CleanupGuard, Exporter, FileStager};
use chrono::NaiveDate;
use std::path::Path;

/// Summary of one completed load.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Normalized running records loaded into `log`
    pub records_loaded: usize,
    /// Export rows dropped as non-running activities
    pub rows_skipped: usize,
    /// Records whose distance was zeroed due to an unrecognized unit
    pub unit_warnings: usize,
    /// Distinct days in `daily_log`
    pub days_loaded: usize,
    /// Number of streaks detected
    pub streaks: i64,
    /// First date in the calendar (earliest logged date)
    pub calendar_start: Option<NaiveDate>,
    /// Last date in the calendar (today at run time)
    pub calendar_end: Option<NaiveDate>,
    /// Rows in `calendar`
    pub calendar_days: usize,
}

/// One-shot ETL pipeline over a database the run owns exclusively.
pub struct LoadPipeline<'a> {
    config: &'a Config,
    db: &'a Database,
}

impl<'a> LoadPipeline<'a> {
    pub fn new(config: &'a Config, db: &'a Database) -> Self {
        Self { config, db }
    }

    /// Run the full pipeline: cleanup, export, stage, then load.
    ///
    /// Filesystem cleanup runs on entry and again on exit regardless of
    /// success, so no download or extraction artifacts persist between runs.
    pub fn run(&self, exporter: &dyn Exporter, stager: &dyn FileStager) -> Result<LoadResult> {
        let archive_path = self.config.export.archive_path.as_deref().ok_or_else(|| {
            Error::Config("export.archive_path is required for a full run".to_string())
        })?;
        let extract_dir = self.config.export.extract_dir.as_deref().ok_or_else(|| {
            Error::Config("export.extract_dir is required for a full run".to_string())
        })?;

        let _cleanup = CleanupGuard::new(archive_path, extract_dir)?;

        tracing::info!(wait_secs = self.config.export.wait_secs, "Triggering export");
        exporter.export(archive_path, self.config.export.wait_secs)?;

        // The exporter's wait is not proof of success; check for the archive
        if !archive_path.exists() {
            return Err(Error::Staging(format!(
                "export did not produce an archive at {}",
                archive_path.display()
            )));
        }

        let log_file = stager.stage(archive_path, extract_dir)?;
        self.load_file(&log_file)
    }

    /// Load an already-staged, cleaned log file into the store.
    pub fn load_file(&self, log_file: &Path) -> Result<LoadResult> {
        self.load_file_as_of(log_file, chrono::Local::now().date_naive())
    }

    /// [`load_file`](Self::load_file) with an explicit calendar end date,
    /// for reproducible loads in tests.
    pub fn load_file_as_of(&self, log_file: &Path, today: NaiveDate) -> Result<LoadResult> {
        tracing::info!(path = %log_file.display(), "Starting load");

        let parsed = LogParser::new().parse_file(log_file)?;

        self.db.replace_unit_conversion()?;
        self.db.replace_log(&parsed.records)?;

        let daily = aggregate_daily(&parsed.records);
        if daily.is_empty() {
            // No valid calendar start date exists; fail instead of guessing
            return Err(Error::EmptyLog);
        }

        let streak_rows = detect_streaks(&daily);
        self.db.replace_daily_log(&streak_rows)?;

        let start = streak_rows[0].date;
        let calendar = generate_calendar(start, today)?;
        self.db.replace_calendar(&calendar)?;

        let result = LoadResult {
            records_loaded: parsed.records.len(),
            rows_skipped: parsed.rows_skipped,
            unit_warnings: parsed.unit_warnings,
            days_loaded: streak_rows.len(),
            streaks: streak_rows.last().map(|r| r.streak_id).unwrap_or(0),
            calendar_start: Some(start),
            calendar_end: Some(today),
            calendar_days: calendar.len(),
        };

        tracing::info!(
            records = result.records_loaded,
            days = result.days_loaded,
            streaks = result.streaks,
            calendar_days = result.calendar_days,
            "Load complete"
        );

        Ok(result)
    }
}
