//! The module contains the configuration the ledger consults.

use crate::format;

/// Tunables for seeding, validation and rendering.
///
/// Values are assumed valid: `starting_balance` is not re-clamped and the
/// transaction bounds are a contract for callers, enforced before money
/// moves. The ledger itself only reads this struct.
#[derive(Clone, Debug)]
pub struct EconomyConfig {
    /// Balance a record is seeded with on first sight.
    pub starting_balance: f64,
    /// Hard upper bound; mutations clamp instead of exceeding it.
    pub max_balance: f64,
    /// Smallest amount a single credit or debit may move.
    pub min_transaction: f64,
    /// Largest amount a single credit or debit may move.
    pub max_transaction: f64,
    pub decimal_places: usize,
    pub use_separators: bool,
    /// Emit one trace line per successful credit or debit.
    pub log_transactions: bool,
    /// Default number of entries a ranking query returns.
    pub top_count: usize,
    /// Seconds a ranking snapshot would be reused. Parsed for compatibility
    /// with existing settings files; rankings are recomputed on every call.
    pub cache_duration: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_balance: 0.0,
            max_balance: 1_000_000_000.0,
            min_transaction: 0.01,
            max_transaction: 100_000_000.0,
            decimal_places: 2,
            use_separators: true,
            log_transactions: true,
            top_count: 10,
            cache_duration: 300,
        }
    }
}

impl EconomyConfig {
    /// Render `balance` with the configured fraction digits and separators.
    pub fn format_balance(&self, balance: f64) -> String {
        format::grouped(balance, self.decimal_places, self.use_separators)
    }
}
