//! The module contains the subcommand handlers.
//!
//! Handlers print rendered templates and report success as a plain `bool`;
//! the caller turns `false` into the process exit code. Amount validation
//! happens here, before the ledger is asked to move anything.

use ledger::{Ledger, LedgerError};
use uuid::Uuid;

use crate::messages::Messages;

// Gold, gray and yellow for the podium; everyone below is white.
const RANK_COLORS: [&str; 3] = ["&6", "&7", "&e"];

pub fn create(ledger: &Ledger, messages: &Messages, name: &str, id: Option<String>) -> bool {
    let existed = ledger.exists(name);
    let external_id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let record = ledger.get_or_create(name, &external_id);
    ledger.save();

    let balance = ledger.config().format_balance(record.balance);
    let key = if existed { "already-exists" } else { "created" };
    println!(
        "{}",
        messages.render(key, &[("player", name), ("balance", &balance)])
    );
    true
}

pub fn balance(ledger: &Ledger, messages: &Messages, name: &str) -> bool {
    if !ledger.exists(name) {
        println!("{}", messages.render("player-not-found", &[("player", name)]));
        return false;
    }

    let balance = ledger.config().format_balance(ledger.balance(name));
    println!(
        "{}",
        messages.render("balance", &[("player", name), ("balance", &balance)])
    );
    true
}

pub fn top(ledger: &Ledger, messages: &Messages, count: Option<usize>) -> bool {
    let count = count.unwrap_or(ledger.config().top_count);
    let entries = ledger.top(count);
    if entries.is_empty() {
        println!("{}", messages.render("top-empty", &[]));
        return true;
    }

    println!(
        "{}",
        messages.render("top-header", &[("count", &entries.len().to_string())])
    );
    for (index, (name, record)) in entries.iter().enumerate() {
        let balance = ledger.config().format_balance(record.balance);
        println!(
            "{}",
            messages.render(
                "top-entry",
                &[
                    ("rank", &(index + 1).to_string()),
                    ("rank_color", RANK_COLORS.get(index).copied().unwrap_or("&f")),
                    ("player", name),
                    ("balance", &balance),
                ],
            )
        );
    }
    true
}

pub fn add(ledger: &Ledger, messages: &Messages, name: &str, raw_amount: &str) -> bool {
    let Some(amount) = checked_amount(ledger, messages, raw_amount) else {
        return false;
    };
    if !ledger.exists(name) {
        println!("{}", messages.render("player-not-found", &[("player", name)]));
        return false;
    }

    let config = ledger.config();
    // Trim to the remaining headroom so the credit lands exactly on the cap.
    let headroom = config.max_balance - ledger.balance(name);
    if headroom <= 0.0 {
        println!(
            "{}",
            messages.render(
                "max-balance-reached",
                &[
                    ("player", name),
                    ("max", &config.format_balance(config.max_balance)),
                ],
            )
        );
        return false;
    }
    let amount = amount.min(headroom);

    match ledger.credit(name, amount) {
        Ok(()) => {
            println!(
                "{}",
                messages.render(
                    "add-success",
                    &[
                        ("player", name),
                        ("amount", &config.format_balance(amount)),
                        ("balance", &config.format_balance(ledger.balance(name))),
                    ],
                )
            );
            true
        }
        Err(err) => {
            println!("{}", message_for_ledger_error(ledger, messages, &err, name));
            false
        }
    }
}

pub fn take(ledger: &Ledger, messages: &Messages, name: &str, raw_amount: &str) -> bool {
    let Some(amount) = checked_amount(ledger, messages, raw_amount) else {
        return false;
    };
    if !ledger.exists(name) {
        println!("{}", messages.render("player-not-found", &[("player", name)]));
        return false;
    }

    match ledger.debit(name, amount) {
        Ok(()) => {
            let config = ledger.config();
            println!(
                "{}",
                messages.render(
                    "take-success",
                    &[
                        ("player", name),
                        ("amount", &config.format_balance(amount)),
                        ("balance", &config.format_balance(ledger.balance(name))),
                    ],
                )
            );
            true
        }
        Err(err) => {
            println!("{}", message_for_ledger_error(ledger, messages, &err, name));
            false
        }
    }
}

pub fn set(ledger: &Ledger, messages: &Messages, name: &str, raw_amount: &str) -> bool {
    let amount = match raw_amount.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => {
            println!(
                "{}",
                messages.render("invalid-amount", &[("amount", raw_amount)])
            );
            return false;
        }
    };
    if !ledger.exists(name) {
        println!("{}", messages.render("player-not-found", &[("player", name)]));
        return false;
    }

    ledger.set_balance(name, amount);
    println!(
        "{}",
        messages.render(
            "set-success",
            &[
                ("player", name),
                ("balance", &ledger.config().format_balance(ledger.balance(name))),
            ],
        )
    );
    true
}

pub fn expand(ledger: &Ledger, name: &str, token: &str) -> bool {
    match ledger::expand(ledger, name, token) {
        Some(value) => {
            println!("{value}");
            true
        }
        None => false,
    }
}

/// Parse and bound-check an amount, printing the matching template on
/// failure.
fn checked_amount(ledger: &Ledger, messages: &Messages, raw_amount: &str) -> Option<f64> {
    let Ok(amount) = raw_amount.parse::<f64>() else {
        println!(
            "{}",
            messages.render("invalid-amount", &[("amount", raw_amount)])
        );
        return None;
    };

    let config = ledger.config();
    // NaN fails this comparison and lands in the minimum message.
    if !(amount >= config.min_transaction) {
        println!(
            "{}",
            messages.render(
                "must-be-positive",
                &[("min", &config.format_balance(config.min_transaction))],
            )
        );
        return None;
    }
    if amount > config.max_transaction {
        println!(
            "{}",
            messages.render(
                "amount-too-large",
                &[("max", &config.format_balance(config.max_transaction))],
            )
        );
        return None;
    }

    Some(amount)
}

fn message_for_ledger_error(
    ledger: &Ledger,
    messages: &Messages,
    err: &LedgerError,
    name: &str,
) -> String {
    match err {
        LedgerError::KeyNotFound(_) => messages.render("player-not-found", &[("player", name)]),
        LedgerError::InsufficientFunds { available, .. } => messages.render(
            "insufficient-funds",
            &[
                ("player", name),
                ("balance", &ledger.config().format_balance(*available)),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use ledger::EconomyConfig;

    use super::*;
    use crate::settings::Settings;

    fn setup(config: EconomyConfig) -> (tempfile::TempDir, Ledger, Messages) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("balances.json"), config);
        let messages = Messages::load("does/not/exist/messages", &Settings::default()).unwrap();
        (dir, ledger, messages)
    }

    fn capped() -> EconomyConfig {
        EconomyConfig {
            max_balance: 100.0,
            ..EconomyConfig::default()
        }
    }

    #[test]
    fn add_rejects_non_numeric_amounts() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");

        assert!(!add(&ledger, &messages, "Alice", "lots"));
        assert_eq!(ledger.balance("Alice"), 0.0);
    }

    #[test]
    fn add_rejects_amounts_below_minimum() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");

        assert!(!add(&ledger, &messages, "Alice", "0.001"));
        assert!(!add(&ledger, &messages, "Alice", "-5"));
        assert!(!add(&ledger, &messages, "Alice", "NaN"));
        assert_eq!(ledger.balance("Alice"), 0.0);
    }

    #[test]
    fn add_rejects_amounts_above_maximum() {
        let (_dir, ledger, messages) = setup(EconomyConfig {
            max_transaction: 50.0,
            ..capped()
        });
        ledger.get_or_create("Alice", "id-alice");

        assert!(!add(&ledger, &messages, "Alice", "50.01"));
        assert_eq!(ledger.balance("Alice"), 0.0);
    }

    #[test]
    fn add_trims_to_headroom() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");
        ledger.credit("Alice", 80.0).unwrap();

        assert!(add(&ledger, &messages, "Alice", "60"));
        assert_eq!(ledger.balance("Alice"), 100.0);
    }

    #[test]
    fn add_at_the_cap_is_refused() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");
        ledger.credit("Alice", 100.0).unwrap();

        assert!(!add(&ledger, &messages, "Alice", "1"));
        assert_eq!(ledger.balance("Alice"), 100.0);
    }

    #[test]
    fn add_unknown_player_fails() {
        let (_dir, ledger, messages) = setup(capped());

        assert!(!add(&ledger, &messages, "Nobody", "10"));
        assert!(!ledger.exists("Nobody"));
    }

    #[test]
    fn take_insufficient_leaves_balance_untouched() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");
        ledger.credit("Alice", 50.0).unwrap();

        assert!(!take(&ledger, &messages, "Alice", "60"));
        assert_eq!(ledger.balance("Alice"), 50.0);
    }

    #[test]
    fn take_down_to_zero() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");
        ledger.credit("Alice", 50.0).unwrap();

        assert!(take(&ledger, &messages, "Alice", "50"));
        assert_eq!(ledger.balance("Alice"), 0.0);
    }

    #[test]
    fn set_clamps_into_bounds() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");

        assert!(set(&ledger, &messages, "Alice", "250"));
        assert_eq!(ledger.balance("Alice"), 100.0);

        assert!(set(&ledger, &messages, "Alice", "-10"));
        assert_eq!(ledger.balance("Alice"), 0.0);
    }

    #[test]
    fn set_rejects_non_finite_amounts() {
        let (_dir, ledger, messages) = setup(capped());
        ledger.get_or_create("Alice", "id-alice");

        assert!(!set(&ledger, &messages, "Alice", "NaN"));
        assert!(!set(&ledger, &messages, "Alice", "inf"));
        assert_eq!(ledger.balance("Alice"), 0.0);
    }

    #[test]
    fn create_reports_existing_account() {
        let (_dir, ledger, messages) = setup(capped());

        assert!(create(&ledger, &messages, "Alice", Some("id-alice".to_string())));
        assert!(create(&ledger, &messages, "Alice", None));

        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.get_or_create("Alice", "id-ignored").external_id,
            "id-alice"
        );
    }

    #[test]
    fn expand_unknown_identity_fails_silently() {
        let (_dir, ledger, _messages) = setup(capped());

        assert!(!expand(&ledger, "Nobody", "eco"));
    }
}
