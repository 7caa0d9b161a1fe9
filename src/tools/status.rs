//! Status tool
//!
//! Runtime status of the tracker service: build info, data file sizes,
//! uptime, and process memory.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::DataPaths;

/// Usage instructions returned by the instructions tool
pub const USAGE_INSTRUCTIONS: &str = r#"
# BJU Tracker Instructions

Tracks food products and meals by their BJU content (Б/Ж/У: protein, fat,
carbohydrate, grams per 100 g of product).

## Workflow

1. `add_product` - store a product with its protein/fat/carb values per 100 g.
   Saving an existing name replaces its record.
2. `list_products` - see everything in the catalog.
3. `log_meal` - pass the eaten products as (name, weight-in-grams) lines.
   Totals are computed as value * weight / 100 per line and summed, then the
   meal is appended to the history. Every named product must already be in the
   catalog; add missing ones first.
4. `meal_history` - the full history text.

## Emailing summaries

Pass `email_to` (list of addresses) to `log_meal` to email the appended
history block. The meal is saved before sending, so a mail failure never
loses the meal. Requires BJU_SMTP_HOST (and related BJU_SMTP_* variables).
"#;

/// Current service status
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub version: String,
    pub build_number: u64,
    pub build_timestamp: String,
    pub data_dir: String,
    pub products_file_bytes: Option<u64>,
    pub meals_file_bytes: Option<u64>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks process start time and data locations for status reports
pub struct StatusTracker {
    start_time: Instant,
    data_dir: PathBuf,
    products_file: PathBuf,
    meals_file: PathBuf,
}

impl StatusTracker {
    pub fn new(paths: &DataPaths) -> Self {
        Self {
            start_time: Instant::now(),
            data_dir: paths.data_dir.clone(),
            products_file: paths.products_file.clone(),
            meals_file: paths.meals_file.clone(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let products_file_bytes = std::fs::metadata(&self.products_file).ok().map(|m| m.len());
        let meals_file_bytes = std::fs::metadata(&self.meals_file).ok().map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            version: build_info.version,
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            data_dir: self.data_dir.display().to_string(),
            products_file_bytes,
            meals_file_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_status_reports_missing_files_as_none() {
        let dir = TempDir::new().unwrap();
        let tracker = StatusTracker::new(&DataPaths::new(dir.path()));

        let status = tracker.get_status();
        assert!(status.products_file_bytes.is_none());
        assert!(status.meals_file_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_status_reports_file_sizes() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        std::fs::write(&paths.products_file, "apple,0.3,0.2,14\n").unwrap();

        let status = StatusTracker::new(&paths).get_status();
        assert_eq!(status.products_file_bytes, Some(17));
    }
}
