//! Demo seed data
//!
//! Creates two demo accounts with opening deposits so a fresh instance has
//! something to log into. Idempotent: an already-seeded store is left alone.

use rust_decimal::Decimal;

use crate::domain::LedgerError;
use crate::ledger::{AccountDirectory, LedgerEngine};

const DEMO_ACCOUNTS: [(&str, &str, &str, i64); 2] = [
    ("1234567890", "Taro Yamada", "password123", 100_000),
    ("0987654321", "Hanako Sato", "password456", 50_000),
];

/// Create the demo accounts if they do not exist yet.
pub async fn seed_demo_data(
    engine: &LedgerEngine,
    directory: &AccountDirectory,
) -> Result<(), LedgerError> {
    for (number, owner, password, opening_balance) in DEMO_ACCOUNTS {
        match directory.create_account(number, owner, password).await {
            Ok(_) => {
                engine.deposit(number, Decimal::from(opening_balance)).await?;
                tracing::info!(account = %number, owner = %owner, "seeded demo account");
            }
            Err(LedgerError::DuplicateAccount(_)) => {
                tracing::info!(account = %number, "demo account already present");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PlainCredential;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let engine = LedgerEngine::new(store.clone());
        let directory = AccountDirectory::new(store, Arc::new(PlainCredential));

        seed_demo_data(&engine, &directory).await.unwrap();
        seed_demo_data(&engine, &directory).await.unwrap();

        let account = directory.get_account("1234567890").await.unwrap();
        assert_eq!(account.balance.value(), dec!(100000));
        // Only one opening deposit despite the second run
        assert_eq!(
            engine.transaction_history("1234567890").await.unwrap().len(),
            1
        );
    }
}
