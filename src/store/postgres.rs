//! PostgreSQL ledger store
//!
//! Each unit of work is a database transaction. Account reads use
//! `SELECT ... FOR UPDATE`, so concurrent units touching the same account
//! serialize on the row lock; the engine acquires rows in ascending
//! account-number order, which keeps two-account units deadlock-free.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction as SqlxTx};
use uuid::Uuid;

use crate::domain::{Account, Balance, LedgerError, NewTransaction, Transaction, TransactionKind};

use super::{LedgerStore, LedgerTx};

/// PostgreSQL-backed [`LedgerStore`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, LedgerError> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(PgTx { tx }))
    }
}

struct PgTx {
    tx: SqlxTx<'static, Postgres>,
}

#[async_trait]
impl LedgerTx for PgTx {
    async fn load_account(
        &mut self,
        account_number: &str,
    ) -> Result<Option<Account>, LedgerError> {
        let row = sqlx::query(
            r#"
            SELECT id, account_number, owner_name, credential, balance, created_at
            FROM accounts
            WHERE account_number = $1
            FOR UPDATE
            "#,
        )
        .bind(account_number)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        row.map(account_from_row).transpose()
    }

    async fn account_exists(&mut self, account_number: &str) -> Result<bool, LedgerError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM accounts WHERE account_number = $1)",
        )
        .bind(account_number)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn save_account(&mut self, account: &Account) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, account_number, owner_name, credential, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET owner_name = EXCLUDED.owner_name,
                credential = EXCLUDED.credential,
                balance = EXCLUDED.balance
            "#,
        )
        .bind(account.id)
        .bind(&account.account_number)
        .bind(&account.owner_name)
        .bind(&account.credential)
        .bind(account.balance.value())
        .bind(account.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn append_transaction(
        &mut self,
        new_tx: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (account_id, kind, amount, balance_after, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(new_tx.account_id)
        .bind(kind_to_str(new_tx.kind))
        .bind(new_tx.amount)
        .bind(new_tx.balance_after)
        .bind(&new_tx.description)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Transaction {
            id,
            account_id: new_tx.account_id,
            kind: new_tx.kind,
            amount: new_tx.amount,
            balance_after: new_tx.balance_after,
            created_at,
            description: new_tx.description,
        })
    }

    async fn list_transactions(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, kind, amount, balance_after, created_at, description
            FROM transactions
            WHERE account_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(transaction_from_row).collect()
    }

    async fn commit(self: Box<Self>) -> Result<(), LedgerError> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }
}

fn account_from_row(row: sqlx::postgres::PgRow) -> Result<Account, LedgerError> {
    let balance: Decimal = row.try_get("balance").map_err(map_sqlx_error)?;
    Ok(Account {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        account_number: row.try_get("account_number").map_err(map_sqlx_error)?,
        owner_name: row.try_get("owner_name").map_err(map_sqlx_error)?,
        credential: row.try_get("credential").map_err(map_sqlx_error)?,
        balance: Balance::new(balance)
            .map_err(|e| LedgerError::Storage(format!("corrupt balance column: {e}")))?,
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
    })
}

fn transaction_from_row(row: sqlx::postgres::PgRow) -> Result<Transaction, LedgerError> {
    let kind: String = row.try_get("kind").map_err(map_sqlx_error)?;
    Ok(Transaction {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        account_id: row.try_get("account_id").map_err(map_sqlx_error)?,
        kind: kind_from_str(&kind)?,
        amount: row.try_get("amount").map_err(map_sqlx_error)?,
        balance_after: row.try_get("balance_after").map_err(map_sqlx_error)?,
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
    })
}

fn kind_to_str(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Deposit => "DEPOSIT",
        TransactionKind::Withdraw => "WITHDRAW",
        TransactionKind::TransferIn => "TRANSFER_IN",
        TransactionKind::TransferOut => "TRANSFER_OUT",
    }
}

fn kind_from_str(s: &str) -> Result<TransactionKind, LedgerError> {
    match s {
        "DEPOSIT" => Ok(TransactionKind::Deposit),
        "WITHDRAW" => Ok(TransactionKind::Withdraw),
        "TRANSFER_IN" => Ok(TransactionKind::TransferIn),
        "TRANSFER_OUT" => Ok(TransactionKind::TransferOut),
        other => Err(LedgerError::Storage(format!(
            "unknown transaction kind in log: {other}"
        ))),
    }
}

/// Map sqlx failures onto the domain taxonomy. Serialization failures and
/// deadlocks are transient and surface as `PersistenceConflict`.
fn map_sqlx_error(err: sqlx::Error) -> LedgerError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(code) = db_err.code() {
            // 40001 serialization_failure, 40P01 deadlock_detected,
            // 23505 unique_violation (lost race on insert)
            if code == "40001" || code == "40P01" || code == "23505" {
                return LedgerError::PersistenceConflict;
            }
        }
    }
    LedgerError::Storage(err.to_string())
}
