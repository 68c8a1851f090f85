//! Transaction records
//!
//! Immutable entries in the append-only transaction log. A record is created
//! exactly once by a ledger operation and never updated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of balance movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
}

impl TransactionKind {
    /// Sign of this kind's contribution to the account balance.
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Deposit | Self::TransferIn => Decimal::ONE,
            Self::Withdraw | Self::TransferOut => Decimal::NEGATIVE_ONE,
        }
    }
}

/// A committed ledger entry. `id` and `created_at` are assigned by the store
/// at append time; `id` is monotonically increasing in append order and
/// `created_at` is the ordering key for history queries.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,

    /// Owning account (back-reference only)
    pub account_id: Uuid,

    pub kind: TransactionKind,

    /// Strictly positive movement amount
    pub amount: Decimal,

    /// Snapshot of the account balance immediately after this transaction
    pub balance_after: Decimal,

    pub created_at: DateTime<Utc>,

    /// Optional free text, e.g. counterparty name for transfers
    pub description: Option<String>,
}

impl Transaction {
    /// Signed contribution of this record to its account's balance.
    pub fn signed_amount(&self) -> Decimal {
        self.kind.sign() * self.amount
    }
}

/// A transaction as produced by the engine, before the store assigns its
/// id and append timestamp.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub description: Option<String>,
}
