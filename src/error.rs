//! Domain-specific errors for the account ledger.
//!
//! Contains error variants for:
//! - Identity errors (account not found, duplicate account, unknown kind)
//! - Capability errors (interest on a non-savings account)
//! - Business-rule failures (insufficient funds, arithmetic overflow)
//! - Malformed commands coming from the batch front end
//!
//! These errors represent business logic failures rather than
//! technical errors like I/O or parsing issues. Non-positive amounts are
//! not errors at all, see [`crate::Validation`].

use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    AccountNotFound,
    DuplicateAccount,
    InvalidAccountType,
    NotInterestBearing,
    InsufficientFunds { available: Decimal },
    AmountOverflow,
    /// A command row is missing a field its command requires.
    InvalidCommand(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AccountNotFound => write!(f, "Account not found!"),
            Error::DuplicateAccount => write!(f, "Account already exists!"),
            Error::InvalidAccountType => write!(f, "Invalid account type!"),
            Error::NotInterestBearing => {
                write!(f, "Interest calculation only applies to savings accounts!")
            }
            Error::InsufficientFunds { available } => write!(
                f,
                "Insufficient funds. Available balance: {}",
                available.normalize()
            ),
            Error::AmountOverflow => write!(f, "Amount is out of range."),
            Error::InvalidCommand(field) => write!(f, "Missing field: {}", field),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_funds_message_shows_available_balance() {
        let err = Error::InsufficientFunds {
            available: dec!(50.00),
        };
        assert_eq!(err.to_string(), "Insufficient funds. Available balance: 50");
    }
}
