//! API layer
//!
//! HTTP transport over the ledger core.

pub mod routes;

pub use routes::{create_router, AppState};
