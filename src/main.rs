//! simple-bank - Minimal Bank Ledger Service
//!
//! Accounts plus deposits, withdrawals and transfers with atomic balance
//! bookkeeping. The ledger core is storage-agnostic; this binary wires it
//! to an HTTP API and either an in-memory or a PostgreSQL store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simple_bank::api::{self, AppState};
use simple_bank::config::{Config, CredentialSchemeKind};
use simple_bank::db;
use simple_bank::ledger::{
    AccountDirectory, CredentialScheme, LedgerEngine, PlainCredential, Sha256Credential,
};
use simple_bank::seed;
use simple_bank::store::{LedgerStore, MemoryStore, PgStore};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simple_bank=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        // Account API; CORS is open for the local frontend
        .nest("/api/account", api::create_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Starting simple-bank server");

    let store: Arc<dyn LedgerStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(url, config.database_max_connections).await?;
            db::ensure_schema(&pool).await?;
            tracing::info!("Database connected successfully");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let scheme: Arc<dyn CredentialScheme> = match config.credential_scheme {
        CredentialSchemeKind::Plain => Arc::new(PlainCredential),
        CredentialSchemeKind::Sha256 => Arc::new(Sha256Credential),
    };

    let engine = LedgerEngine::new(store.clone());
    let directory = AccountDirectory::new(store, scheme);

    if config.seed_demo_data {
        seed::seed_demo_data(&engine, &directory).await?;
    }

    let app = build_router(AppState { engine, directory });

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
