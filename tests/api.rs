//! HTTP API integration tests over the in-memory store.

mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use common::{request, test_app};

fn as_decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).expect("not a decimal")
}

#[tokio::test]
async fn test_create_account() {
    let app = test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "1111",
            "owner_name": "Alice",
            "password": "pw"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["account_number"], "1111");
    assert_eq!(body["owner_name"], "Alice");
    assert_eq!(as_decimal(&body["balance"]), dec!(0));
    // The credential never appears on the wire
    assert!(body.get("credential").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_duplicate_account() {
    let app = test_app();
    let payload = json!({
        "account_number": "2222",
        "owner_name": "Alice",
        "password": "pw"
    });

    let (status, _) = request(&app, "POST", "/api/account/create", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&app, "POST", "/api/account/create", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "duplicate_account");
}

#[tokio::test]
async fn test_create_account_empty_number_rejected() {
    let app = test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "  ",
            "owner_name": "Alice",
            "password": "pw"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn test_login() {
    let app = test_app();
    request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "1111",
            "owner_name": "Alice",
            "password": "password123"
        })),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/login",
        Some(json!({"account_number": "1111", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["account"]["account_number"], "1111");

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/login",
        Some(json!({"account_number": "1111", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body.get("account").is_none());

    // Unknown account is a failed login, not a 404
    let (status, body) = request(
        &app,
        "POST",
        "/api/account/login",
        Some(json!({"account_number": "9999", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_deposit_and_get_account() {
    let app = test_app();
    request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "1111",
            "owner_name": "Alice",
            "password": "pw"
        })),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/deposit",
        Some(json!({"account_number": "1111", "amount": "1000.00"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "DEPOSIT");
    assert_eq!(as_decimal(&body["amount"]), dec!(1000.00));
    assert_eq!(as_decimal(&body["balance_after"]), dec!(1000.00));

    let (status, body) = request(&app, "GET", "/api/account/1111", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&body["balance"]), dec!(1000.00));
}

#[tokio::test]
async fn test_get_missing_account() {
    let app = test_app();
    let (status, body) = request(&app, "GET", "/api/account/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "account_not_found");
}

#[tokio::test]
async fn test_withdraw_insufficient_funds() {
    let app = test_app();
    request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "1111",
            "owner_name": "Alice",
            "password": "pw"
        })),
    )
    .await;
    request(
        &app,
        "POST",
        "/api/account/deposit",
        Some(json!({"account_number": "1111", "amount": "100.00"})),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/withdraw",
        Some(json!({"account_number": "1111", "amount": "500.00"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "insufficient_funds");

    let (_, body) = request(&app, "GET", "/api/account/1111", None).await;
    assert_eq!(as_decimal(&body["balance"]), dec!(100.00));
}

#[tokio::test]
async fn test_invalid_amount_rejected() {
    let app = test_app();
    request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "1111",
            "owner_name": "Alice",
            "password": "pw"
        })),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/deposit",
        Some(json!({"account_number": "1111", "amount": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_amount");
}

#[tokio::test]
async fn test_transfer_and_history() {
    let app = test_app();
    for (number, owner) in [("1111", "Alice"), ("2222", "Bob")] {
        request(
            &app,
            "POST",
            "/api/account/create",
            Some(json!({
                "account_number": number,
                "owner_name": owner,
                "password": "pw"
            })),
        )
        .await;
    }
    request(
        &app,
        "POST",
        "/api/account/deposit",
        Some(json!({"account_number": "1111", "amount": "1000.00"})),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/transfer",
        Some(json!({
            "from_account_number": "1111",
            "to_account_number": "2222",
            "amount": "300.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "TRANSFER_OUT");
    assert_eq!(as_decimal(&body["balance_after"]), dec!(700.00));
    assert_eq!(body["description"], "Transfer to Bob");

    let (status, body) = request(&app, "GET", "/api/account/2222/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["kind"], "TRANSFER_IN");
    assert_eq!(as_decimal(&entries[0]["amount"]), dec!(300.00));
    assert_eq!(entries[0]["description"], "Transfer from Alice");

    let (_, body) = request(&app, "GET", "/api/account/1111/transactions", None).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Most recent first
    assert_eq!(entries[0]["kind"], "TRANSFER_OUT");
    assert_eq!(entries[1]["kind"], "DEPOSIT");
}

#[tokio::test]
async fn test_self_transfer_rejected() {
    let app = test_app();
    request(
        &app,
        "POST",
        "/api/account/create",
        Some(json!({
            "account_number": "1111",
            "owner_name": "Alice",
            "password": "pw"
        })),
    )
    .await;
    request(
        &app,
        "POST",
        "/api/account/deposit",
        Some(json!({"account_number": "1111", "amount": "100.00"})),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/account/transfer",
        Some(json!({
            "from_account_number": "1111",
            "to_account_number": "1111",
            "amount": "10.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "self_transfer");
}
