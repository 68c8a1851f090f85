//! Ledger Error Types
//!
//! Pure domain errors that don't depend on infrastructure. Every failure of
//! a ledger operation is one of these variants; callers branch on kind
//! instead of parsing messages.

use thiserror::Error;

use super::AmountError;

/// Closed set of ledger failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// Amount is zero, negative, too precise, or over the limit
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// No account with the given account number
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account number already taken at creation
    #[error("Account number already exists: {0}")]
    DuplicateAccount(String),

    /// Insufficient balance for a withdrawal or transfer debit
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    /// Transfer where source and destination are the same account
    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    /// Transient concurrent-write conflict; the caller may retry
    #[error("Persistence conflict: concurrent modification detected")]
    PersistenceConflict,

    /// Opaque storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(
        required: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    ) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// Check if this is a client error (caller's fault, retry won't help)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::AccountNotFound(_)
                | Self::DuplicateAccount(_)
                | Self::InsufficientFunds { .. }
                | Self::SelfTransfer
        )
    }

    /// Check if the failed operation may safely be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PersistenceConflict)
    }
}
