//! runstreak - load a personal running log into SQLite and report on
//! streaks and yearly mileage
//!
//! Uses XDG Base Directory specification for file locations:
//! - Database: $XDG_DATA_HOME/runstreak/runlog.db (~/.local/share/runstreak/runlog.db)
//! - Logs: $XDG_STATE_HOME/runstreak/runstreak.log (~/.local/state/runstreak/runstreak.log)
//! - Config: $XDG_CONFIG_HOME/runstreak/config.toml (~/.config/runstreak/config.toml)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use runstreak_core::analytics::reports;
use runstreak_core::ingest::LoadPipeline;
use runstreak_core::{Config, Database};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runstreak")]
#[command(about = "Running log ETL and streak analytics")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a staged log export into the database (full rebuild)
    Load {
        /// Path to the cleaned tab-separated export file
        log_file: PathBuf,
    },

    /// Show streaks longer than a minimum number of days
    Streaks {
        /// Minimum streak length in days (strict); defaults from config
        #[arg(long)]
        min_days: Option<i64>,
    },

    /// Show total mileage per calendar year
    Yearly,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;

    let _log_guard =
        runstreak_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let db_path = Config::database_path();
    tracing::info!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path).context("failed to open database")?;
    db.ensure_schema().context("failed to prepare schema")?;

    match args.command {
        Command::Load { log_file } => {
            let result = LoadPipeline::new(&config, &db)
                .load_file(&log_file)
                .context("load failed")?;

            println!("Load complete:");
            println!("  Records loaded:   {}", result.records_loaded);
            println!("  Rows skipped:     {}", result.rows_skipped);
            if result.unit_warnings > 0 {
                println!("  Unit warnings:    {}", result.unit_warnings);
            }
            println!("  Days:             {}", result.days_loaded);
            println!("  Streaks:          {}", result.streaks);
            if let (Some(start), Some(end)) = (result.calendar_start, result.calendar_end) {
                println!(
                    "  Calendar:         {} .. {} ({} days)",
                    start, end, result.calendar_days
                );
            }
        }

        Command::Streaks { min_days } => {
            let min_days = min_days.unwrap_or(config.reports.min_streak_days);
            let summaries = db
                .streak_summaries(min_days)
                .context("streak query failed")?;

            if summaries.is_empty() {
                println!("No streaks longer than {} days.", min_days);
                println!("Run 'runstreak load <log-file>' first if the database is empty.");
            } else {
                print!("{}", reports::render_streak_table(&summaries));
            }
        }

        Command::Yearly => {
            let yearly = db.yearly_mileage().context("yearly mileage query failed")?;

            if yearly.is_empty() {
                println!("No mileage recorded.");
                println!("Run 'runstreak load <log-file>' first if the database is empty.");
            } else {
                print!("{}", reports::render_yearly_table(&yearly));
            }
        }
    }

    Ok(())
}
