// src/storage/mod.rs
use crate::statement::models::TransactionRecord;
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 3] = ["Date", "Description", "Amount"];

/// Owns every file the converter writes: the CSV, the run summary and debug dumps.
/// All writes go through one manager so output is produced by a single writer.
pub struct StorageManager {
    output_file: PathBuf,
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager for `output_file`, creating its directory if needed.
    pub fn new<P: AsRef<Path>>(output_file: P) -> Result<Self, StorageError> {
        let output_file = output_file.as_ref().to_path_buf();
        let base_dir = match output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).map_err(StorageError::IoError)?;
            tracing::info!("Created output directory {}", base_dir.display());
        }

        Ok(Self { output_file, base_dir })
    }

    #[allow(dead_code)]
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Writes the header row and one row per record, in the order given.
    pub fn write_records(&self, records: &[TransactionRecord]) -> Result<PathBuf, StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.output_file)?;

        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!("Saved {} transactions to {}", records.len(), self.output_file.display());
        Ok(self.output_file.clone())
    }

    /// Saves a serializable value as pretty JSON.
    pub fn save_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<PathBuf, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(StorageError::IoError)?;
        }

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved run summary to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Saves an annotated text dump for one statement under `<output dir>/debug/`.
    pub fn save_debug_text(&self, statement: &Path, contents: &str) -> Result<PathBuf, StorageError> {
        let debug_dir = self.base_dir.join("debug");
        fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;

        let stem = statement
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement".to_string());
        let path = debug_dir.join(format!("{}_annotated.txt", stem));
        fs::write(&path, contents).map_err(StorageError::IoError)?;

        tracing::info!("Saved annotated text to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record(day: u32, description: &str, cents: i64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            description: description.to_string(),
            amount: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn csv_has_header_and_formatted_rows() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out").join("all.csv")).unwrap();

        let path = storage
            .write_records(&[record(14, "AMAZON.COM, PURCHASE", -1234), record(15, "PAYROLL", 5600)])
            .unwrap();

        let written = fs::read_to_string(path).unwrap();
        assert_eq!(
            written,
            "Date,Description,Amount\n2024-03-14,\"AMAZON.COM, PURCHASE\",-12.34\n2024-03-15,PAYROLL,56.00\n"
        );
    }

    #[test]
    fn empty_record_list_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("empty.csv")).unwrap();
        storage.write_records(&[]).unwrap();
        assert_eq!(fs::read_to_string(storage.output_file()).unwrap(), "Date,Description,Amount\n");
    }

    #[test]
    fn debug_dumps_land_next_to_the_output() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("all.csv")).unwrap();
        let path = storage
            .save_debug_text(Path::new("/statements/2024-03.pdf"), "[HEADER] Checks Paid\n")
            .unwrap();
        assert_eq!(path, dir.path().join("debug").join("2024-03_annotated.txt"));
    }
}
