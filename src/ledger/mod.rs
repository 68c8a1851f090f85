//! Ledger core
//!
//! The transaction engine and the account directory, both operating purely
//! through the persistence contract.

pub mod directory;
pub mod engine;


pub use directory::{AccountDirectory, CredentialScheme, PlainCredential, Sha256Credential};
pub use engine::LedgerEngine;
