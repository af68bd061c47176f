//! Error types for runstreak-core

use thiserror::Error;

/// Main error type for the runstreak-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed field in the exported log file.
    ///
    /// Date and duration are load-bearing (grouping and ordering keys), so a
    /// row that fails to parse aborts the run instead of being dropped.
    #[error("parse error at line {line}, field {field}: {message}")]
    Parse {
        line: usize,
        field: &'static str,
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Export/staging collaborator failure
    #[error("staging error: {0}")]
    Staging(String),

    /// Stored data failed to round-trip (should not happen; the store is
    /// fully rebuilt by this tool)
    #[error("corrupt store: {0}")]
    Corrupt(String),

    /// No qualifying activity rows; there is no valid calendar start date
    #[error("log contains no qualifying activity rows")]
    EmptyLog,

    /// Calendar bounds are inverted (all logged dates are in the future)
    #[error("invalid calendar range: start {start} is after end {end}")]
    InvalidCalendarRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// Result type alias for runstreak-core
pub type Result<T> = std::result::Result<T, Error>;
