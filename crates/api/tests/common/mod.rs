//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! over a `#[sqlx::test]`-provided pool, plus request/response helpers and
//! seed-data constructors.

// Each test binary compiles this module separately and uses a subset of the
// helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cardvault_api::auth::jwt::{generate_admin_token, generate_customer_token, JwtConfig};
use cardvault_api::auth::password::hash_password;
use cardvault_api::config::ServerConfig;
use cardvault_api::router::build_app_router;
use cardvault_api::state::AppState;
use cardvault_core::card::CardStatus;
use cardvault_core::roles::AdminRole;
use cardvault_core::types::DbId;
use cardvault_corebank::SimulatedCoreBanking;
use cardvault_db::models::admin_user::{AdminUser, CreateAdminUser};
use cardvault_db::models::card::{Card, CreateCard};
use cardvault_db::models::customer::{CreateCustomer, Customer};
use cardvault_db::models::transaction::{CreateTransaction, Transaction};
use cardvault_db::repositories::{AdminUserRepo, CardRepo, CustomerRepo, TransactionRepo};

/// Plaintext password used for every seeded principal.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with known secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            customer_secret: "customer-test-secret-long-enough".to_string(),
            admin_secret: "admin-test-secret-long-enough".to_string(),
            expires_in_mins: 60,
        },
    }
}

/// Build the full application router over the given pool.
///
/// Mirrors the router construction in `main.rs` so tests exercise the same
/// middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        corebank: Arc::new(SimulatedCoreBanking),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert an error response: check status and the `error.code` field.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], code, "unexpected error code: {json}");
    json
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a customer with [`TEST_PASSWORD`].
pub async fn create_customer(pool: &PgPool, email: &str) -> Customer {
    let input = CreateCustomer {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        first_name: "Test".to_string(),
        last_name: "Customer".to_string(),
        phone: None,
    };
    CustomerRepo::create(pool, &input)
        .await
        .expect("customer creation should succeed")
}

/// Create an admin user with [`TEST_PASSWORD`] and the given role.
pub async fn create_admin(pool: &PgPool, email: &str, role: AdminRole) -> AdminUser {
    let input = CreateAdminUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        first_name: "Test".to_string(),
        last_name: "Admin".to_string(),
        role,
    };
    AdminUserRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed")
}

/// Create a card for a customer in the given status.
pub async fn create_card(pool: &PgPool, customer_id: DbId, status: CardStatus) -> Card {
    let input = CreateCard {
        customer_id,
        card_number: "4532015112830366".to_string(),
        card_type: "DEBIT".to_string(),
        status,
        expiry_month: 12,
        expiry_year: 2030,
    };
    CardRepo::create(pool, &input)
        .await
        .expect("card creation should succeed")
}

/// Create an APPROVED transaction dated `age_days` ago.
pub async fn create_transaction(pool: &PgPool, card: &Card, age_days: i64) -> Transaction {
    create_transaction_with_status(pool, card, age_days, "APPROVED").await
}

/// Create a transaction with an explicit status, dated `age_days` ago.
pub async fn create_transaction_with_status(
    pool: &PgPool,
    card: &Card,
    age_days: i64,
    status: &str,
) -> Transaction {
    let input = CreateTransaction {
        card_id: card.id,
        customer_id: card.customer_id,
        amount_cents: 1299,
        currency: "USD".to_string(),
        merchant_name: "Acme Coffee".to_string(),
        merchant_category: Some("restaurants".to_string()),
        status: status.to_string(),
        transaction_date: chrono::Utc::now() - chrono::Duration::days(age_days),
    };
    TransactionRepo::create(pool, &input)
        .await
        .expect("transaction creation should succeed")
}

/// Mint a customer bearer token with the test secrets.
pub fn customer_token(customer_id: DbId) -> String {
    generate_customer_token(customer_id, &test_config().jwt).expect("token generation")
}

/// Mint an admin bearer token with the test secrets.
pub fn admin_token(admin_id: DbId, role: AdminRole) -> String {
    generate_admin_token(admin_id, role, &test_config().jwt).expect("token generation")
}
