//! The module contains the JSON snapshot persistence for the record table.
//!
//! The whole table is written to one pretty-printed file on every mutation
//! and read back once at startup. Storage faults are logged and absorbed:
//! the in-memory table keeps working and is never rolled back.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::record::BalanceRecord;

#[derive(Debug, Error)]
enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read the table from `path`.
///
/// A missing file is bootstrapped as an empty table; unreadable or malformed
/// content yields an empty table with the fault logged, never raised.
pub fn load(path: &Path) -> HashMap<String, BalanceRecord> {
    match try_load(path) {
        Ok(records) => {
            info!("Loaded {} balance records", records.len());
            records
        }
        Err(err) => {
            error!("could not load balance file {}: {err}", path.display());
            HashMap::new()
        }
    }
}

fn try_load(path: &Path) -> Result<HashMap<String, BalanceRecord>, PersistError> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        try_save(path, &HashMap::new())?;
        info!("Created new balance file {}", path.display());
        return Ok(HashMap::new());
    }

    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write the whole table to `path`, overwriting in place.
///
/// There is no rename-swap or backup copy; a crash mid-write can leave the
/// file truncated until the next successful save.
pub fn save(path: &Path, records: &HashMap<String, BalanceRecord>) {
    if let Err(err) = try_save(path, records) {
        error!("could not save balance file {}: {err}", path.display());
    }
}

fn try_save(path: &Path, records: &HashMap<String, BalanceRecord>) -> Result<(), PersistError> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(balance: f64) -> BalanceRecord {
        BalanceRecord::new("7ad0e0cb-0612-4b3a-9c3c-d0b07a5f64c3".to_string(), balance)
    }

    #[test]
    fn missing_file_is_bootstrapped_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("balances.json");

        let records = load(&path);

        assert!(records.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn round_trip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.json");

        let mut records = HashMap::new();
        records.insert("Alice".to_string(), record(1234.56));
        records.insert("Bob".to_string(), record(0.0));
        save(&path, &records);

        assert_eq!(load(&path), records);
    }

    #[test]
    fn malformed_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(load(&path).is_empty());
    }

    #[test]
    fn save_over_malformed_file_repairs_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.json");
        fs::write(&path, "{\"Alice\": {\"balance\"").unwrap();

        let mut records = HashMap::new();
        records.insert("Alice".to_string(), record(5.0));
        save(&path, &records);

        assert_eq!(load(&path), records);
    }

    #[test]
    fn save_onto_directory_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();

        // The directory itself is not a writable file path.
        save(dir.path(), &HashMap::new());

        assert!(try_save(dir.path(), &HashMap::new()).is_err());
    }
}
