//! # runstreak-core
//!
//! Core library for runstreak - a personal running-log ETL and streak
//! analyzer.
//!
//! This library provides:
//! - Domain types for activity records, daily aggregates, streaks, and the
//!   reporting calendar
//! - Ingestion (file staging, TSV parsing, normalization)
//! - Analytics transforms (daily rollup, streak detection, calendar
//!   generation)
//! - Database storage layer with SQLite
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Layer 0 (Raw):** The exported tab-separated log file on disk
//! - **Layer 1 (Canonical):** Normalized per-activity rows in the `log` table
//! - **Layer 2 (Derived):** `daily_log` (aggregates + streak fields) and
//!   `calendar`, fully rebuilt on every load
//!
//! ## Example
//!
//! ```rust,no_run
//! use runstreak_core::{Config, Database};
//! use runstreak_core::ingest::LoadPipeline;
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! let result = LoadPipeline::new(&config, &db)
//!     .load_file("log.txt".as_ref())
//!     .expect("load failed");
//! println!("Loaded {} days across {} streaks", result.days_loaded, result.streaks);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use ingest::{LoadPipeline, LoadResult};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod staging;
pub mod types;
