//! Meal ledger store
//!
//! Append-only history of logged meals. Each append writes one formatted block
//! and never touches prior content.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::models::MealRecord;

use super::StoreResult;

/// The meal history, backed by a text file at an injected path
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the record's block to the ledger and return the block text
    /// (the mail sender uses it as the message body).
    pub fn append(&self, record: &MealRecord) -> StoreResult<String> {
        let block = record.to_block();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())?;
        Ok(block)
    }

    /// Full history text verbatim, or None when no meal was ever logged
    pub fn read_all(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealLine, Nutrition};
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn record(hour: u32) -> MealRecord {
        MealRecord::with_timestamp(
            Local.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            vec![MealLine::new("apple", "200")],
            Nutrition::new(0.6, 0.4, 28.0),
        )
    }

    #[test]
    fn test_read_all_missing_file() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(dir.path().join("meals.txt"));
        assert!(ledger.read_all().unwrap().is_none());
    }

    #[test]
    fn test_append_returns_block_and_persists() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(dir.path().join("meals.txt"));

        let block = ledger.append(&record(12)).unwrap();
        assert_eq!(
            block,
            "2024-05-01 12:00:00\napple,200 г\nИтого: Б: 0.60 Ж: 0.40 У: 28.00\n\n"
        );
        assert_eq!(ledger.read_all().unwrap().unwrap(), block);
    }

    #[test]
    fn test_append_never_rewrites_prior_blocks() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(dir.path().join("meals.txt"));

        let first = ledger.append(&record(8)).unwrap();
        let second = ledger.append(&record(19)).unwrap();

        let all = ledger.read_all().unwrap().unwrap();
        assert_eq!(all, format!("{}{}", first, second));
    }
}
