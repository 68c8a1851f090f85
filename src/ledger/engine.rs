//! Ledger engine
//!
//! Executes the money-movement operations. Every operation runs inside a
//! single store unit of work: read balance, validate, write balance, append
//! to the transaction log, commit. A failure at any point rolls the whole
//! unit back, so no partial effect is ever observable.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{
    Account, Amount, LedgerError, NewTransaction, Transaction, TransactionKind,
};
use crate::store::{LedgerStore, LedgerTx};

/// The core transaction engine.
///
/// Holds the injected persistence contract; all balance mutations in the
/// system go through these four operations.
#[derive(Clone)]
pub struct LedgerEngine {
    store: Arc<dyn LedgerStore>,
}

impl LedgerEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Credit `amount` to an account and record a Deposit transaction.
    pub async fn deposit(
        &self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let amount = Amount::new(amount)?;

        let mut tx = self.store.begin().await?;
        let account = load_required(tx.as_mut(), account_number).await?;

        let new_balance = account.balance.credit(&amount)?;
        tx.save_account(&account.clone().with_balance(new_balance))
            .await?;
        let record = tx
            .append_transaction(NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Deposit,
                amount: amount.value(),
                balance_after: new_balance.value(),
                description: None,
            })
            .await?;
        tx.commit().await?;

        tracing::info!(account = %account_number, %amount, "deposit completed");
        Ok(record)
    }

    /// Debit `amount` from an account and record a Withdraw transaction.
    pub async fn withdraw(
        &self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let amount = Amount::new(amount)?;

        let mut tx = self.store.begin().await?;
        let account = load_required(tx.as_mut(), account_number).await?;

        if !account.balance.is_sufficient_for(&amount) {
            return Err(LedgerError::insufficient_funds(
                amount.value(),
                account.balance.value(),
            ));
        }

        let new_balance = account.balance.debit(&amount)?;
        tx.save_account(&account.clone().with_balance(new_balance))
            .await?;
        let record = tx
            .append_transaction(NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Withdraw,
                amount: amount.value(),
                balance_after: new_balance.value(),
                description: None,
            })
            .await?;
        tx.commit().await?;

        tracing::info!(account = %account_number, %amount, "withdrawal completed");
        Ok(record)
    }

    /// Move `amount` between two accounts as one atomic unit.
    ///
    /// Both accounts are validated before any mutation; the debit side is
    /// recorded as TransferOut and the credit side as TransferIn, each with
    /// the counterparty's name in the description. Returns the debit-side
    /// record; the credit-side record is reachable via history.
    pub async fn transfer(
        &self,
        from_number: &str,
        to_number: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let amount = Amount::new(amount)?;

        if from_number == to_number {
            return Err(LedgerError::SelfTransfer);
        }

        let mut tx = self.store.begin().await?;

        // Lock accounts in ascending account-number order regardless of
        // transfer direction, so opposite-direction transfers cannot
        // deadlock on row locks.
        let (first, second) = if from_number <= to_number {
            (from_number, to_number)
        } else {
            (to_number, from_number)
        };
        let first_account = load_required(tx.as_mut(), first).await?;
        let second_account = load_required(tx.as_mut(), second).await?;
        let (from_account, to_account) = if first == from_number {
            (first_account, second_account)
        } else {
            (second_account, first_account)
        };

        if !from_account.balance.is_sufficient_for(&amount) {
            return Err(LedgerError::insufficient_funds(
                amount.value(),
                from_account.balance.value(),
            ));
        }

        let from_balance = from_account.balance.debit(&amount)?;
        let to_balance = to_account.balance.credit(&amount)?;

        tx.save_account(&from_account.clone().with_balance(from_balance))
            .await?;
        let debit_record = tx
            .append_transaction(NewTransaction {
                account_id: from_account.id,
                kind: TransactionKind::TransferOut,
                amount: amount.value(),
                balance_after: from_balance.value(),
                description: Some(format!("Transfer to {}", to_account.owner_name)),
            })
            .await?;

        tx.save_account(&to_account.clone().with_balance(to_balance))
            .await?;
        tx.append_transaction(NewTransaction {
            account_id: to_account.id,
            kind: TransactionKind::TransferIn,
            amount: amount.value(),
            balance_after: to_balance.value(),
            description: Some(format!("Transfer from {}", from_account.owner_name)),
        })
        .await?;

        tx.commit().await?;

        tracing::info!(
            from = %from_number,
            to = %to_number,
            %amount,
            "transfer completed"
        );
        Ok(debit_record)
    }

    /// All transactions of an account, most recent first.
    ///
    /// A finite, re-queryable snapshot ordered by `created_at` descending.
    pub async fn transaction_history(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let mut tx = self.store.begin().await?;
        let account = load_required(tx.as_mut(), account_number).await?;
        let history = tx.list_transactions(account.id).await?;
        // Read-only unit; dropping it releases the snapshot.
        Ok(history)
    }
}

async fn load_required(
    tx: &mut dyn LedgerTx,
    account_number: &str,
) -> Result<Account, LedgerError> {
    tx.load_account(account_number)
        .await?
        .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
}
