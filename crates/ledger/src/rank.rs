//! The module contains the balance ranking query.

use crate::record::BalanceRecord;

/// Return at most `limit` entries ordered by balance, highest first.
///
/// Ties break on the name so repeated calls over the same table give the
/// same order. The ranking is recomputed from the given snapshot on every
/// call; nothing is cached between calls.
pub fn top_balances(
    mut snapshot: Vec<(String, BalanceRecord)>,
    limit: usize,
) -> Vec<(String, BalanceRecord)> {
    snapshot.sort_by(|(name_a, record_a), (name_b, record_b)| {
        record_b
            .balance
            .total_cmp(&record_a.balance)
            .then_with(|| name_a.cmp(name_b))
    });
    snapshot.truncate(limit);
    snapshot
}
