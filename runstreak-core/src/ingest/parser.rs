//! Record normalizer for the exported training log
//!
//! Parses the cleaned tab-separated export into [`ActivityRecord`]s:
//! - Only rows with `Type == "Run"` are kept; everything else is dropped
//!   silently (the export mixes in cycling, swimming, etc.)
//! - Distance is converted to miles via [`DistanceUnit`]; an unrecognized
//!   unit zeroes the converted distance and logs a data-quality warning
//!   rather than failing
//! - Duration is a time-of-day-shaped `HH:MM:SS` value converted to total
//!   seconds; a malformed duration or date is a hard error because date is
//!   the grouping and ordering key downstream

use crate::error::{Error, Result};
use crate::types::{ActivityRecord, DistanceUnit};
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Activity type the pipeline keeps; all other types are dropped.
const RUN_TYPE: &str = "Run";

/// Result of normalizing one export file.
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Normalized records, in file order
    pub records: Vec<ActivityRecord>,
    /// Rows dropped because they are not running activities
    pub rows_skipped: usize,
    /// Records whose distance was zeroed due to an unrecognized unit
    pub unit_warnings: usize,
}

/// Column positions resolved from the header row.
///
/// The export carries at least these six columns; extras are ignored.
#[derive(Debug)]
struct Columns {
    date: usize,
    activity_type: usize,
    sub_type: usize,
    distance: usize,
    distance_unit: usize,
    duration: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header.trim_end_matches('\r').split('\t').collect();

        let find = |name: &'static str| -> Result<usize> {
            names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| Error::Parse {
                    line: 1,
                    field: name,
                    message: format!("column missing from header: {:?}", names),
                })
        };

        Ok(Self {
            date: find("Date")?,
            activity_type: find("Type")?,
            sub_type: find("SubType")?,
            distance: find("Distance")?,
            distance_unit: find("DistanceUnit")?,
            duration: find("Duration")?,
        })
    }
}

/// Parser for the cleaned tab-separated log export.
#[derive(Debug, Default)]
pub struct LogParser;

impl LogParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a cleaned export file into normalized activity records.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutput> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(Error::Parse {
                    line: 1,
                    field: "header",
                    message: "file is empty".to_string(),
                })
            }
        };
        let columns = Columns::from_header(&header)?;

        let mut output = ParseOutput::default();

        for (idx, line) in lines.enumerate() {
            let line = line?;
            // Header is line 1; data starts at line 2
            let line_no = idx + 2;

            if line.trim().is_empty() {
                continue;
            }

            match self.parse_row(&columns, &line, line_no, &mut output)? {
                Some(record) => output.records.push(record),
                None => output.rows_skipped += 1,
            }
        }

        tracing::info!(
            records = output.records.len(),
            skipped = output.rows_skipped,
            unit_warnings = output.unit_warnings,
            path = %path.display(),
            "Parsed export file"
        );

        Ok(output)
    }

    /// Parse one data row. Returns `None` for non-run rows.
    fn parse_row(
        &self,
        columns: &Columns,
        line: &str,
        line_no: usize,
        output: &mut ParseOutput,
    ) -> Result<Option<ActivityRecord>> {
        let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
        let field = |idx: usize| fields.get(idx).copied().unwrap_or("").trim();

        if field(columns.activity_type) != RUN_TYPE {
            return Ok(None);
        }

        let date_str = field(columns.date);
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| Error::Parse {
            line: line_no,
            field: "Date",
            message: format!("{:?}: {}", date_str, e),
        })?;

        let distance_str = field(columns.distance);
        let distance: f64 = if distance_str.is_empty() {
            0.0
        } else {
            distance_str.parse().map_err(|e| Error::Parse {
                line: line_no,
                field: "Distance",
                message: format!("{:?}: {}", distance_str, e),
            })?
        };

        let unit_str = field(columns.distance_unit);
        let distance_miles = match DistanceUnit::parse(unit_str) {
            Some(unit) => distance * unit.to_miles_factor(),
            None => {
                // Unconvertible entries contribute zero distance; they do
                // not abort the load.
                tracing::warn!(
                    line = line_no,
                    unit = unit_str,
                    distance,
                    "Unrecognized distance unit, zeroing converted distance"
                );
                output.unit_warnings += 1;
                0.0
            }
        };

        let duration_seconds = parse_duration_seconds(field(columns.duration), line_no)?;

        let category = match field(columns.sub_type) {
            "" => None,
            s => Some(s.to_string()),
        };

        Ok(Some(ActivityRecord {
            date,
            category,
            distance,
            distance_unit: unit_str.to_string(),
            distance_miles,
            duration_seconds,
        }))
    }
}

/// Convert an `HH:MM:SS` time-of-day value to total seconds.
///
/// An absent duration contributes zero seconds (the export omits it for
/// unmeasured entries); a present but malformed one aborts the run.
fn parse_duration_seconds(value: &str, line_no: usize) -> Result<i64> {
    if value.is_empty() {
        return Ok(0);
    }

    let time = NaiveTime::parse_from_str(value, "%H:%M:%S").map_err(|e| Error::Parse {
        line: line_no,
        field: "Duration",
        message: format!("{:?}: {}", value, e),
    })?;

    Ok(i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60 + i64::from(time.second()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Date\tType\tSubType\tDistance\tDistanceUnit\tDuration";

    fn parse_lines(rows: &[&str]) -> Result<ParseOutput> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        LogParser::new().parse_file(file.path())
    }

    #[test]
    fn test_parses_run_rows() {
        let output = parse_lines(&[
            "2023-01-01\tRun\tEasy\t3.1\tMile\t00:30:15",
            "2023-01-02\tRun\t\t5\tKilometer\t00:25:00",
        ])
        .unwrap();

        assert_eq!(output.records.len(), 2);
        assert_eq!(output.rows_skipped, 0);

        let first = &output.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(first.category.as_deref(), Some("Easy"));
        assert_eq!(first.distance_miles, 3.1);
        assert_eq!(first.duration_seconds, 30 * 60 + 15);

        let second = &output.records[1];
        assert_eq!(second.category, None);
        assert!((second.distance_miles - 5.0 * 0.6213712).abs() < 1e-9);
        assert_eq!(second.duration_seconds, 25 * 60);
    }

    #[test]
    fn test_drops_non_run_rows_silently() {
        let output = parse_lines(&[
            "2023-01-01\tBike\t\t20\tMile\t01:00:00",
            "2023-01-01\tRun\tEasy\t3\tMile\t00:30:00",
            "2023-01-02\tSwim\t\t1\tMile\t00:40:00",
        ])
        .unwrap();

        assert_eq!(output.records.len(), 1);
        assert_eq!(output.rows_skipped, 2);
    }

    #[test]
    fn test_unknown_unit_zeroes_distance() {
        let output = parse_lines(&["2023-01-01\tRun\t\t5\tFurlong\t00:30:00"]).unwrap();

        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].distance, 5.0);
        assert_eq!(output.records[0].distance_miles, 0.0);
        assert_eq!(output.unit_warnings, 1);
    }

    #[test]
    fn test_malformed_duration_is_hard_error() {
        let err = parse_lines(&["2023-01-01\tRun\t\t3\tMile\tnot-a-time"]).unwrap_err();
        match err {
            Error::Parse { line, field, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "Duration");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_is_hard_error() {
        let err = parse_lines(&["01/02/2023\tRun\t\t3\tMile\t00:30:00"]).unwrap_err();
        assert!(matches!(err, Error::Parse { field: "Date", .. }));
    }

    #[test]
    fn test_empty_duration_contributes_zero() {
        let output = parse_lines(&["2023-01-01\tRun\t\t3\tMile\t"]).unwrap();
        assert_eq!(output.records[0].duration_seconds, 0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Date\tType\tDistance").unwrap();
        writeln!(file, "2023-01-01\tRun\t3").unwrap();
        let err = LogParser::new().parse_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }
}
