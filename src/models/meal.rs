//! Meal models
//!
//! A meal is an ordered list of (product name, weight) lines as typed by the
//! user, plus the summed nutrition totals and a creation timestamp.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::Nutrition;

/// One user-entered (product name, weight in grams) pair, kept as raw text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealLine {
    pub name: String,
    pub weight: String,
}

impl MealLine {
    pub fn new(name: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
        }
    }
}

/// A logged meal: timestamp, the lines as typed, and the summed totals.
/// Immutable once appended to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    pub logged_at: DateTime<Local>,
    pub lines: Vec<MealLine>,
    pub totals: Nutrition,
}

impl MealRecord {
    /// Create a record stamped with the current local time (second resolution)
    pub fn new(lines: Vec<MealLine>, totals: Nutrition) -> Self {
        Self {
            logged_at: Local::now(),
            lines,
            totals,
        }
    }

    pub fn with_timestamp(
        logged_at: DateTime<Local>,
        lines: Vec<MealLine>,
        totals: Nutrition,
    ) -> Self {
        Self {
            logged_at,
            lines,
            totals,
        }
    }

    /// Render the ledger block for this record:
    /// a timestamp line, one `name,weight г` line per item, the `Итого:` summary
    /// line with totals rounded to two decimals, and a trailing blank line.
    pub fn to_block(&self) -> String {
        let mut block = String::new();
        block.push_str(&self.logged_at.format("%Y-%m-%d %H:%M:%S").to_string());
        block.push('\n');
        for line in &self.lines {
            block.push_str(&format!("{},{} г\n", line.name, line.weight));
        }
        block.push_str(&format!(
            "Итого: Б: {:.2} Ж: {:.2} У: {:.2}\n\n",
            self.totals.protein, self.totals.fat, self.totals.carb
        ));
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_block_format() {
        let logged_at = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let record = MealRecord::with_timestamp(
            logged_at,
            vec![MealLine::new("apple", "200")],
            Nutrition::new(0.6, 0.4, 28.0),
        );

        let block = record.to_block();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "2024-05-01 12:30:00");
        assert_eq!(lines[1], "apple,200 г");
        assert_eq!(lines[2], "Итого: Б: 0.60 Ж: 0.40 У: 28.00");
        assert!(block.ends_with("\n\n"));
    }

    #[test]
    fn test_block_lines_kept_as_typed() {
        let logged_at = Local.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let record = MealRecord::with_timestamp(
            logged_at,
            vec![MealLine::new("  Apple ", "200"), MealLine::new("buckwheat", "90.5")],
            Nutrition::zero(),
        );

        let block = record.to_block();
        assert!(block.contains("  Apple ,200 г\n"));
        assert!(block.contains("buckwheat,90.5 г\n"));
    }
}
