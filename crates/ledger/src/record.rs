//! The module contains the persisted balance record.

use serde::{Deserialize, Serialize};

/// A single identity's entry in the ledger.
///
/// The ledger keys records by display name; `external_id` is a stable
/// secondary identifier (a UUID in practice) kept alongside so the identity
/// can be renamed without breaking references. It is never used for lookups.
///
/// Balances are binary floating point. Fractional drift over long credit and
/// debit sequences is accepted, not corrected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub external_id: String,
    pub balance: f64,
}

impl BalanceRecord {
    pub fn new(external_id: String, balance: f64) -> Self {
        Self {
            external_id,
            balance,
        }
    }
}
