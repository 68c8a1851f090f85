//! Database module
//!
//! Connection pool construction and schema bootstrap for the PostgreSQL
//! backend.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create the ledger tables if they do not exist yet.
///
/// Transactions are append-only: the schema carries no UPDATE path for them,
/// and `id`/`created_at` are assigned by the database at insert time.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id             UUID PRIMARY KEY,
            account_number TEXT NOT NULL UNIQUE,
            owner_name     TEXT NOT NULL,
            credential     TEXT NOT NULL,
            balance        NUMERIC(15, 2) NOT NULL CHECK (balance >= 0),
            created_at     TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id            BIGSERIAL PRIMARY KEY,
            account_id    UUID NOT NULL REFERENCES accounts (id),
            kind          TEXT NOT NULL,
            amount        NUMERIC(15, 2) NOT NULL CHECK (amount > 0),
            balance_after NUMERIC(15, 2) NOT NULL CHECK (balance_after >= 0),
            created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
            description   TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_account_created
        ON transactions (account_id, created_at DESC, id DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema verified");
    Ok(())
}
