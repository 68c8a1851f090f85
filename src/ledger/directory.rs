//! Account directory
//!
//! Account creation, lookup, and authentication. Storage is delegated to
//! the same persistence contract the engine uses; credential handling is
//! pluggable behind [`CredentialScheme`].

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::{Account, LedgerError};
use crate::store::LedgerStore;

/// How credentials are stored and verified.
///
/// `protect` maps the raw secret to its stored form at account creation;
/// `verify` checks a supplied secret against the stored form.
pub trait CredentialScheme: Send + Sync {
    fn protect(&self, raw: &str) -> String;
    fn verify(&self, raw: &str, stored: &str) -> bool;
}

/// Plain-equality credentials, the reference behavior.
#[derive(Debug, Default)]
pub struct PlainCredential;

impl CredentialScheme for PlainCredential {
    fn protect(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn verify(&self, raw: &str, stored: &str) -> bool {
        raw == stored
    }
}

/// SHA-256 digest credentials: only the hex digest is stored.
#[derive(Debug, Default)]
pub struct Sha256Credential;

impl CredentialScheme for Sha256Credential {
    fn protect(&self, raw: &str) -> String {
        hex::encode(Sha256::digest(raw.as_bytes()))
    }

    fn verify(&self, raw: &str, stored: &str) -> bool {
        self.protect(raw) == stored
    }
}

/// Thin account management layer consumed by the engine's callers.
#[derive(Clone)]
pub struct AccountDirectory {
    store: Arc<dyn LedgerStore>,
    scheme: Arc<dyn CredentialScheme>,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn LedgerStore>, scheme: Arc<dyn CredentialScheme>) -> Self {
        Self { store, scheme }
    }

    /// Create a new account with a zero balance.
    pub async fn create_account(
        &self,
        account_number: &str,
        owner_name: &str,
        credential: &str,
    ) -> Result<Account, LedgerError> {
        let mut tx = self.store.begin().await?;

        if tx.account_exists(account_number).await? {
            return Err(LedgerError::DuplicateAccount(account_number.to_string()));
        }

        let account = Account::new(
            account_number.to_string(),
            owner_name.to_string(),
            self.scheme.protect(credential),
        );
        tx.save_account(&account).await?;
        tx.commit().await?;

        tracing::info!(account = %account_number, owner = %owner_name, "account created");
        Ok(account)
    }

    /// Look up an account by number.
    pub async fn get_account(&self, account_number: &str) -> Result<Account, LedgerError> {
        let mut tx = self.store.begin().await?;
        tx.load_account(account_number)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }

    /// True iff the account exists and the credential verifies.
    /// A missing account is a failed login, not an error.
    pub async fn authenticate(
        &self,
        account_number: &str,
        credential: &str,
    ) -> Result<bool, LedgerError> {
        let mut tx = self.store.begin().await?;
        let account = tx.load_account(account_number).await?;
        Ok(match account {
            Some(account) => self.scheme.verify(credential, &account.credential),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_scheme_exact_match() {
        let scheme = PlainCredential;
        assert_eq!(scheme.protect("pw"), "pw");
        assert!(scheme.verify("pw", "pw"));
        assert!(!scheme.verify("pw", "other"));
    }

    #[test]
    fn test_sha256_scheme_stores_digest() {
        let scheme = Sha256Credential;
        let stored = scheme.protect("pw");

        assert_ne!(stored, "pw");
        assert_eq!(stored.len(), 64);
        assert!(scheme.verify("pw", &stored));
        assert!(!scheme.verify("wrong", &stored));
    }

    #[test]
    fn test_sha256_scheme_is_deterministic() {
        let scheme = Sha256Credential;
        assert_eq!(scheme.protect("pw"), scheme.protect("pw"));
    }
}
