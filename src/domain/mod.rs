//! Domain layer
//!
//! Entities, monetary primitives, and the error taxonomy. Nothing in this
//! module depends on the web or storage layers.

pub mod account;
pub mod amount;
pub mod error;
pub mod transaction;

pub use account::Account;
pub use amount::{Amount, AmountError, Balance};
pub use error::LedgerError;
pub use transaction::{NewTransaction, Transaction, TransactionKind};
