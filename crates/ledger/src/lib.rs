use std::path::PathBuf;

pub use config::EconomyConfig;
pub use error::LedgerError;
pub use expansion::expand;
pub use record::BalanceRecord;
use store::RecordStore;
use tracing::info;

mod config;
mod error;
mod expansion;
pub mod format;
mod persist;
mod rank;
mod record;
mod store;

type ResultLedger<T> = Result<T, LedgerError>;

/// The balance ledger.
///
/// Owns the in-memory record table and writes the whole table back to its
/// JSON file on every mutation, inside the same critical section, so the
/// file only ever holds a state the table actually passed through. Every
/// operation takes `&self`; share the ledger between threads with an `Arc`.
#[derive(Debug)]
pub struct Ledger {
    store: RecordStore,
    path: PathBuf,
    config: EconomyConfig,
}

impl Ledger {
    /// Open the ledger at `path`, loading existing records.
    ///
    /// Never fails: a missing file is created on the spot and unreadable
    /// content is logged and replaced by an empty table.
    pub fn open(path: impl Into<PathBuf>, config: EconomyConfig) -> Self {
        let path = path.into();
        let store = RecordStore::new();
        store.replace_all(persist::load(&path));

        Self {
            store,
            path,
            config,
        }
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Fetch the record for `name`, creating it with the starting balance on
    /// first sight.
    ///
    /// Creation does not write the file by itself; arrival hooks follow up
    /// with [`save`](Self::save).
    pub fn get_or_create(&self, name: &str, external_id: &str) -> BalanceRecord {
        self.store.get_or_insert_with(name, || {
            BalanceRecord::new(external_id.to_string(), self.config.starting_balance)
        })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Current balance for `name`, `0.0` when the identity is unknown.
    pub fn balance(&self, name: &str) -> f64 {
        self.store.get(name).map_or(0.0, |record| record.balance)
    }

    /// `true` when `name` exists and holds at least `amount`.
    pub fn has_at_least(&self, name: &str, amount: f64) -> bool {
        self.store
            .get(name)
            .is_some_and(|record| record.balance >= amount)
    }

    /// Assign `amount` to `name`, clamped into `[0, max_balance]`.
    ///
    /// Unknown identities are ignored; assignment never creates a record.
    pub fn set_balance(&self, name: &str, amount: f64) {
        let mut records = self.store.write();
        let Some(record) = records.get_mut(name) else {
            return;
        };

        record.balance = amount.clamp(0.0, self.config.max_balance);
        persist::save(&self.path, &records);
    }

    /// Add `amount` to `name`'s balance.
    ///
    /// A sum past `max_balance` is stored as exactly `max_balance`; the
    /// excess is discarded and the credit still succeeds.
    pub fn credit(&self, name: &str, amount: f64) -> ResultLedger<()> {
        let mut records = self.store.write();
        let record = records
            .get_mut(name)
            .ok_or_else(|| LedgerError::KeyNotFound(name.to_string()))?;

        let before = record.balance;
        record.balance = (before + amount).min(self.config.max_balance);
        let after = record.balance;
        persist::save(&self.path, &records);

        if self.config.log_transactions {
            info!("[ADD] {name}: {before:.2} -> {after:.2} (+{amount:.2})");
        }
        Ok(())
    }

    /// Subtract `amount` from `name`'s balance.
    ///
    /// Nothing moves on failure: the balance is untouched when the identity
    /// is unknown or holds less than `amount`.
    pub fn debit(&self, name: &str, amount: f64) -> ResultLedger<()> {
        let mut records = self.store.write();
        let record = records
            .get_mut(name)
            .ok_or_else(|| LedgerError::KeyNotFound(name.to_string()))?;

        if record.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                available: record.balance,
                requested: amount,
            });
        }

        let before = record.balance;
        record.balance -= amount;
        let after = record.balance;
        persist::save(&self.path, &records);

        if self.config.log_transactions {
            info!("[REMOVE] {name}: {before:.2} -> {after:.2} (-{amount:.2})");
        }
        Ok(())
    }

    /// The `limit` highest balances, highest first.
    pub fn top(&self, limit: usize) -> Vec<(String, BalanceRecord)> {
        rank::top_balances(self.store.snapshot(), limit)
    }

    /// Write the whole table to the file now.
    ///
    /// Mutations already persist on their own; this is the arrival and
    /// departure hook and the shutdown safety net.
    pub fn save(&self) {
        let records = self.store.read();
        persist::save(&self.path, &records);
    }

    /// Number of known identities.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
