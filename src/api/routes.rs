//! API Routes
//!
//! HTTP endpoint definitions. Handlers parse primitives, call the ledger
//! core, and shape plain records into JSON; no ledger logic lives here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, Transaction, TransactionKind};
use crate::error::AppError;
use crate::ledger::{AccountDirectory, LedgerEngine};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: LedgerEngine,
    pub directory: AccountDirectory,
}

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub account_number: String,
    pub owner_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub account_number: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountResponse>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub account_number: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account_number: String,
    pub to_account_number: String,
    pub amount: Decimal,
}

/// Account as exposed on the wire. The stored credential is never included.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub account_number: String,
    pub owner_name: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_number: account.account_number,
            owner_name: account.owner_name,
            balance: account.balance.value(),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind,
            amount: tx.amount,
            balance_after: tx.balance_after,
            created_at: tx.created_at,
            description: tx.description,
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the account API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_account))
        .route("/login", post(login))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/transfer", post(transfer))
        .route("/:account_number", get(get_account))
        .route("/:account_number/transactions", get(get_transaction_history))
}

// =========================================================================
// POST /create
// =========================================================================

/// Create a new account
async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    if request.account_number.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "account_number must not be empty".to_string(),
        ));
    }

    let account = state
        .directory
        .create_account(
            &request.account_number,
            &request.owner_name,
            &request.password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

// =========================================================================
// POST /login
// =========================================================================

/// Trivial credential check; a failed login is a 200 with success=false,
/// matching the reference behavior.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let authenticated = state
        .directory
        .authenticate(&request.account_number, &request.password)
        .await?;

    if !authenticated {
        return Ok(Json(LoginResponse {
            success: false,
            account: None,
        }));
    }

    let account = state.directory.get_account(&request.account_number).await?;
    Ok(Json(LoginResponse {
        success: true,
        account: Some(account.into()),
    }))
}

// =========================================================================
// GET /:account_number
// =========================================================================

/// Get account by number
async fn get_account(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.directory.get_account(&account_number).await?;
    Ok(Json(account.into()))
}

// =========================================================================
// POST /deposit
// =========================================================================

async fn deposit(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let record = state
        .engine
        .deposit(&request.account_number, request.amount)
        .await?;
    Ok(Json(record.into()))
}

// =========================================================================
// POST /withdraw
// =========================================================================

async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let record = state
        .engine
        .withdraw(&request.account_number, request.amount)
        .await?;
    Ok(Json(record.into()))
}

// =========================================================================
// POST /transfer
// =========================================================================

/// Transfer between two accounts; responds with the debit-side record.
async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let record = state
        .engine
        .transfer(
            &request.from_account_number,
            &request.to_account_number,
            request.amount,
        )
        .await?;
    Ok(Json(record.into()))
}

// =========================================================================
// GET /:account_number/transactions
// =========================================================================

async fn get_transaction_history(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let history = state.engine.transaction_history(&account_number).await?;
    Ok(Json(history.into_iter().map(Into::into).collect()))
}
