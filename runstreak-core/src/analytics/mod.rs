//! Analytics transforms over normalized activity records
//!
//! These are the derived (Layer 2) computations, fully recomputed on every
//! load:
//!
//! ```text
//! ActivityRecord ──► daily::aggregate ──► streaks::detect ──► daily_log
//!                                             │
//!                                     min date ▼        today
//!                                  calendar::generate ──► calendar
//! ```

pub mod calendar;
pub mod daily;
pub mod reports;
pub mod streaks;

pub use calendar::generate_calendar;
pub use daily::aggregate_daily;
pub use streaks::detect_streaks;
