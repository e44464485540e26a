//! The module contains the errors the ledger can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an identity is not found.
//! - [`InsufficientFunds`] thrown when a debit asks for more than the
//!   identity holds.
//!
//!  [`KeyNotFound`]: LedgerError::KeyNotFound
//!  [`InsufficientFunds`]: LedgerError::InsufficientFunds
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Insufficient funds: {available:.2} available, {requested:.2} requested")]
    InsufficientFunds { available: f64, requested: f64 },
}
