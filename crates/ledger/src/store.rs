//! The module contains the thread-safe in-memory record table.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::record::BalanceRecord;

/// Table mapping display names to balance records.
///
/// The table-wide `RwLock` is the only synchronization in the crate: readers
/// share it, and every mutation takes the write half so read-modify-write
/// cycles and the snapshot written to disk stay consistent with each other.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<HashMap<String, BalanceRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is not propagated: mutations are single assignments, so the
    // map a panicking holder leaves behind is still valid.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, HashMap<String, BalanceRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, BalanceRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, name: &str) -> Option<BalanceRecord> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Fetch the record for `name`, inserting `default()` first when absent.
    ///
    /// Lookup and insertion happen under one write guard, so two racing
    /// callers agree on a single record.
    pub fn get_or_insert_with<F>(&self, name: &str, default: F) -> BalanceRecord
    where
        F: FnOnce() -> BalanceRecord,
    {
        self.write()
            .entry(name.to_string())
            .or_insert_with(default)
            .clone()
    }

    /// A consistent copy of the whole table.
    pub fn snapshot(&self) -> Vec<(String, BalanceRecord)> {
        self.read()
            .iter()
            .map(|(name, record)| (name.clone(), record.clone()))
            .collect()
    }

    /// Replace the whole table, usually with freshly loaded records.
    pub fn replace_all(&self, records: HashMap<String, BalanceRecord>) {
        *self.write() = records;
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn record(balance: f64) -> BalanceRecord {
        BalanceRecord::new("00000000-0000-0000-0000-000000000000".to_string(), balance)
    }

    #[test]
    fn get_or_insert_with_creates_once() {
        let store = RecordStore::new();

        let first = store.get_or_insert_with("Alice", || record(25.0));
        let second = store.get_or_insert_with("Alice", || record(99.0));

        assert_eq!(first.balance, 25.0);
        assert_eq!(second.balance, 25.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_copies_every_record() {
        let store = RecordStore::new();
        store.get_or_insert_with("Alice", || record(10.0));
        store.get_or_insert_with("Bob", || record(20.0));

        let mut snapshot = store.snapshot();
        snapshot.sort_by(|(a, _), (b, _)| a.cmp(b));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].0, "Alice");
        assert_eq!(snapshot[1].1.balance, 20.0);
    }

    #[test]
    fn racing_inserts_agree_on_one_record() {
        let store = Arc::new(RecordStore::new());

        let handles: Vec<_> = (0..8)
            .map(|index| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.get_or_insert_with("Alice", || record(f64::from(index)))
                })
            })
            .collect();

        let winners: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().balance)
            .collect();

        assert_eq!(store.len(), 1);
        // Every thread observed the same seeded balance.
        assert!(winners.iter().all(|balance| *balance == winners[0]));
    }
}
