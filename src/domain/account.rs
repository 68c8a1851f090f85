//! Account entity
//!
//! Current-state record of a bank account. Balances are only ever changed
//! through ledger operations; nothing outside the engine mutates them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Balance;

/// A bank account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account ID, assigned at creation
    pub id: Uuid,

    /// Caller-supplied account number, unique across all accounts
    pub account_number: String,

    /// Display name of the owner; not ledger-relevant
    pub owner_name: String,

    /// Stored credential, in whatever form the active scheme produced.
    /// Never serialized out through the API.
    #[serde(skip_serializing)]
    pub credential: String,

    /// Current balance, always >= 0
    pub balance: Balance,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a fresh account with a zero balance.
    pub fn new(account_number: String, owner_name: String, credential: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number,
            owner_name,
            credential,
            balance: Balance::zero(),
            created_at: Utc::now(),
        }
    }

    /// Replace the balance, returning the updated record.
    pub fn with_balance(mut self, balance: Balance) -> Self {
        self.balance = balance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = Account::new(
            "1111".to_string(),
            "Alice".to_string(),
            "secret".to_string(),
        );

        assert_eq!(account.account_number, "1111");
        assert_eq!(account.balance, Balance::zero());
    }

    #[test]
    fn test_account_ids_are_unique() {
        let a = Account::new("1".into(), "A".into(), "x".into());
        let b = Account::new("2".into(), "B".into(), "x".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_credential_not_serialized() {
        let account = Account::new("1111".into(), "Alice".into(), "secret".into());
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("credential"));
    }
}
