//! simple-bank Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod seed;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};

pub use domain::{Account, Amount, AmountError, Balance, LedgerError};
pub use domain::{Transaction, TransactionKind};
pub use ledger::{AccountDirectory, LedgerEngine};
pub use store::{LedgerStore, MemoryStore, PgStore};
