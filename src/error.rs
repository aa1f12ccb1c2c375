//! Error types for the marina ledger.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, MarinaError>;

/// Errors that can occur while decoding, billing or managing the registry.
#[derive(Error, Debug)]
pub enum MarinaError {
    /// Failed to open, read or write the roster file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Placement token is not one of the known categories
    #[error("Invalid place type '{token}'")]
    InvalidPlacement { token: String },

    /// Wrong field count or a field that does not parse
    #[error("Malformed record: {message}")]
    MalformedRecord { message: String },

    /// Boat fields violate a construction rule
    #[error("Invalid boat: {message}")]
    InvalidBoat { message: String },

    /// No boat with the given name
    #[error("No boat with that name: {name}")]
    NotFound { name: String },

    /// A boat with the same name (ignoring case) is already registered
    #[error("A boat named '{name}' is already registered")]
    DuplicateName { name: String },

    /// Payment larger than the outstanding balance
    #[error("Payment of ${amount} is more than the amount owed, ${owed}")]
    PaymentExceedsBalance { amount: Money, owed: Money },

    /// A charge would push the balance past what `Money` can represent
    #[error("Balance owed by '{name}' is too large to charge")]
    BalanceOverflow { name: String },

    /// Payment amounts must not be negative
    #[error("Payment amount ${amount} is negative")]
    NegativePayment { amount: Money },

    /// Registry reached its capacity
    #[error("Marina is full ({capacity} boats)")]
    RegistryFull { capacity: usize },

    /// Missing roster file argument
    #[error("Missing roster file argument. Usage: marina-ledger <BoatData.csv>")]
    MissingArgument,
}

impl MarinaError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        MarinaError::MalformedRecord {
            message: message.into(),
        }
    }
}
