//! The module contains the read-only text expansion values.
//!
//! Hosts that substitute balance placeholders into chat or scoreboard text
//! resolve them here. Supported tokens:
//!
//! - `eco` the balance truncated to a whole number
//! - `eco_formatted` the grouped decimal rendering
//! - `eco_shorthand` the magnitude-suffixed rendering

use crate::{Ledger, format};

/// Resolve `token` for `name`.
///
/// `None` for unknown identities and unknown tokens; expansion never
/// creates records.
pub fn expand(ledger: &Ledger, name: &str, token: &str) -> Option<String> {
    if !ledger.exists(name) {
        return None;
    }

    let balance = ledger.balance(name);
    match token {
        "eco" => Some((balance.trunc() as i64).to_string()),
        "eco_formatted" => Some(ledger.config().format_balance(balance)),
        "eco_shorthand" => Some(format::shorthand(balance)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EconomyConfig;

    fn ledger() -> (tempfile::TempDir, Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("balances.json"), EconomyConfig::default());
        (dir, ledger)
    }

    #[test]
    fn known_identity_tokens() {
        let (_dir, ledger) = ledger();
        ledger.get_or_create("Alice", "id-alice");
        ledger.credit("Alice", 1_234_567.89).unwrap();

        assert_eq!(expand(&ledger, "Alice", "eco").unwrap(), "1234567");
        assert_eq!(
            expand(&ledger, "Alice", "eco_formatted").unwrap(),
            "1,234,567.89"
        );
        assert_eq!(expand(&ledger, "Alice", "eco_shorthand").unwrap(), "1.2M");
    }

    #[test]
    fn unknown_identity_is_none() {
        let (_dir, ledger) = ledger();

        assert_eq!(expand(&ledger, "Nobody", "eco"), None);
        assert!(!ledger.exists("Nobody"));
    }

    #[test]
    fn unknown_token_is_none() {
        let (_dir, ledger) = ledger();
        ledger.get_or_create("Alice", "id-alice");

        assert_eq!(expand(&ledger, "Alice", "eco_raw"), None);
    }
}
