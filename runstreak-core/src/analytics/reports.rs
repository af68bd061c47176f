//! Console rendering for the reporting surface.

use crate::types::{StreakSummary, YearlyMileage};

/// Render the streak summary as a fixed-width console table.
pub fn render_streak_table(rows: &[StreakSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>9}  {:>12}  {:>12}  {:>12}  {:>10}\n",
        "Streak", "Start", "Last Day", "Miles", "Days"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:>9}  {:>12}  {:>12}  {:>12.2}  {:>10}\n",
            row.streak_id,
            row.start_of_streak.to_string(),
            row.last_day_of_streak.to_string(),
            row.total_distance,
            row.total_days
        ));
    }
    out
}

/// Render yearly mileage as a fixed-width console table.
pub fn render_yearly_table(rows: &[YearlyMileage]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6}  {:>12}\n", "Year", "Miles"));
    for row in rows {
        out.push_str(&format!("{:>6}  {:>12.2}\n", row.year, row.total_distance));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_table_includes_each_row() {
        let rows = vec![StreakSummary {
            streak_id: 4,
            start_of_streak: "2023-01-01".parse().unwrap(),
            last_day_of_streak: "2023-01-15".parse().unwrap(),
            total_distance: 62.5,
            total_days: 15,
        }];

        let table = render_streak_table(&rows);
        assert!(table.contains("2023-01-01"));
        assert!(table.contains("2023-01-15"));
        assert!(table.contains("62.50"));
        assert!(table.contains("15"));
    }

    #[test]
    fn test_yearly_table() {
        let rows = vec![
            YearlyMileage {
                year: 2022,
                total_distance: 1001.25,
            },
            YearlyMileage {
                year: 2023,
                total_distance: 650.0,
            },
        ];

        let table = render_yearly_table(&rows);
        assert!(table.contains("2022"));
        assert!(table.contains("1001.25"));
        assert!(table.contains("650.00"));
    }
}
