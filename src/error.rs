use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type BankResult<T> = std::result::Result<T, BankError>;

/// Everything that can go wrong while operating on the ledger.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("PIN must be exactly 4 digits")]
    InvalidPinFormat,

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("no such account: {0}")]
    AccountNotFound(String),

    #[error("incorrect PIN")]
    IncorrectPin,

    #[error("no user is logged in")]
    NotLoggedIn,

    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BankError {
    /// True when the failure came from the backing store rather than
    /// from a domain rule.
    pub fn is_persistence(&self) -> bool {
        matches!(self, BankError::Io(_) | BankError::Serialization(_))
    }
}
