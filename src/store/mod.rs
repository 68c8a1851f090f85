//! Persistence contract
//!
//! The ledger engine never talks to a database directly; it opens an atomic
//! unit of work against a [`LedgerStore`] and performs all reads and writes
//! through the resulting [`LedgerTx`]. Either the unit commits as a whole or
//! nothing it did is observable.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, LedgerError, NewTransaction, Transaction};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Durable keyed storage of accounts plus the append-only transaction log.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Open an atomic unit of work.
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, LedgerError>;
}

/// One atomic unit of work. Dropping a unit without calling [`commit`]
/// discards every write it made.
///
/// Implementations must serialize units touching the same account: a read
/// of an account balance inside a unit stays valid until the unit ends.
///
/// [`commit`]: LedgerTx::commit
#[async_trait]
pub trait LedgerTx: Send {
    /// Load an account by its account number, locking it for this unit.
    async fn load_account(&mut self, account_number: &str)
        -> Result<Option<Account>, LedgerError>;

    /// Check whether an account number is taken.
    async fn account_exists(&mut self, account_number: &str) -> Result<bool, LedgerError>;

    /// Insert or update an account record.
    async fn save_account(&mut self, account: &Account) -> Result<(), LedgerError>;

    /// Append a transaction to the log, assigning its id and timestamp.
    async fn append_transaction(
        &mut self,
        new_tx: NewTransaction,
    ) -> Result<Transaction, LedgerError>;

    /// All transactions of an account, most recent first.
    async fn list_transactions(&mut self, account_id: Uuid)
        -> Result<Vec<Transaction>, LedgerError>;

    /// Make every write of this unit durable.
    async fn commit(self: Box<Self>) -> Result<(), LedgerError>;
}
