//! In-memory ledger store
//!
//! Keeps the whole ledger behind one async mutex. A unit of work holds the
//! owned guard for its lifetime, which serializes all units (equivalent to
//! serializable isolation), and stages its writes locally; commit publishes
//! them into the shared state in one step.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::{Account, LedgerError, NewTransaction, Transaction};

use super::{LedgerStore, LedgerTx};

#[derive(Debug, Default)]
struct MemState {
    /// Accounts keyed by account number
    accounts: HashMap<String, Account>,
    /// Append-only transaction log
    transactions: Vec<Transaction>,
    /// Next transaction id to assign
    next_tx_id: i64,
}

/// In-memory [`LedgerStore`], used by tests and as the default backend when
/// no database is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, LedgerError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let next_tx_id = guard.next_tx_id;
        Ok(Box::new(MemTx {
            guard,
            staged_accounts: HashMap::new(),
            staged_transactions: Vec::new(),
            next_tx_id,
        }))
    }
}

struct MemTx {
    guard: OwnedMutexGuard<MemState>,
    /// Writes staged by this unit, keyed by account number
    staged_accounts: HashMap<String, Account>,
    staged_transactions: Vec<Transaction>,
    next_tx_id: i64,
}

#[async_trait]
impl LedgerTx for MemTx {
    async fn load_account(
        &mut self,
        account_number: &str,
    ) -> Result<Option<Account>, LedgerError> {
        if let Some(account) = self.staged_accounts.get(account_number) {
            return Ok(Some(account.clone()));
        }
        Ok(self.guard.accounts.get(account_number).cloned())
    }

    async fn account_exists(&mut self, account_number: &str) -> Result<bool, LedgerError> {
        Ok(self.staged_accounts.contains_key(account_number)
            || self.guard.accounts.contains_key(account_number))
    }

    async fn save_account(&mut self, account: &Account) -> Result<(), LedgerError> {
        self.staged_accounts
            .insert(account.account_number.clone(), account.clone());
        Ok(())
    }

    async fn append_transaction(
        &mut self,
        new_tx: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        self.next_tx_id += 1;
        let tx = Transaction {
            id: self.next_tx_id,
            account_id: new_tx.account_id,
            kind: new_tx.kind,
            amount: new_tx.amount,
            balance_after: new_tx.balance_after,
            created_at: Utc::now(),
            description: new_tx.description,
        };
        self.staged_transactions.push(tx.clone());
        Ok(tx)
    }

    async fn list_transactions(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let mut txs: Vec<Transaction> = self
            .guard
            .transactions
            .iter()
            .chain(self.staged_transactions.iter())
            .filter(|tx| tx.account_id == account_id)
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(txs)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), LedgerError> {
        for (number, account) in self.staged_accounts.drain() {
            self.guard.accounts.insert(number, account);
        }
        self.guard.transactions.append(&mut self.staged_transactions);
        self.guard.next_tx_id = self.next_tx_id;
        Ok(())
    }
}
