//! HTTP-level integration tests for alerts, preferences, and fraud reports.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use cardvault_core::card::CardStatus;
use common::{assert_error, body_json, get_auth, post_auth, post_json_auth, put_json_auth};

/// A fraud report flags the transaction, raises a high-severity alert, and
/// returns the network reference.
#[sqlx::test(migrations = "../db/migrations")]
async fn fraud_report_flow(pool: PgPool) {
    let customer = common::create_customer(&pool, "fraud@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 1).await;
    let app = common::build_test_app(pool.clone());
    let token = common::customer_token(customer.id);

    let body = serde_json::json!({ "transaction_id": txn.id, "description": "Card was skimmed" });
    let response = post_json_auth(&app, "/api/v1/fraud/report", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["alert"]["severity"], "HIGH");
    assert_eq!(json["data"]["alert"]["alert_type"], "FRAUD");
    assert_eq!(json["data"]["alert"]["action_required"], true);
    assert!(json["data"]["network_reference"]
        .as_str()
        .unwrap()
        .starts_with("FRD-"));

    let flagged: bool = sqlx::query_scalar("SELECT fraud_flag FROM transactions WHERE id = $1")
        .bind(txn.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(flagged);
}

/// Reporting fraud on someone else's transaction 404s.
#[sqlx::test(migrations = "../db/migrations")]
async fn fraud_report_ownership(pool: PgPool) {
    let alice = common::create_customer(&pool, "f-alice@example.com").await;
    let bob = common::create_customer(&pool, "f-bob@example.com").await;
    let bobs_card = common::create_card(&pool, bob.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &bobs_card, 1).await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(alice.id);

    let body = serde_json::json!({ "transaction_id": txn.id });
    let response = post_json_auth(&app, "/api/v1/fraud/report", &token, body).await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

/// Marking an alert read is idempotent; alerts list newest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn alert_read_flow(pool: PgPool) {
    let customer = common::create_customer(&pool, "alerts@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 1).await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(customer.id);

    // Raise an alert via the fraud report path.
    let body = serde_json::json!({ "transaction_id": txn.id });
    let response = post_json_auth(&app, "/api/v1/fraud/report", &token, body).await;
    let alert_id = body_json(response).await["data"]["alert"]["id"].as_i64().unwrap();

    let response = get_auth(&app, "/api/v1/alerts", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], alert_id);
    assert_eq!(json["data"][0]["status"], "NEW");

    let response = post_auth(&app, &format!("/api/v1/alerts/{alert_id}/read"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "READ");

    // Second read keeps READ rather than failing.
    let response = post_auth(&app, &format!("/api/v1/alerts/{alert_id}/read"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "READ");
}

/// Preferences default when no row exists and persist partial updates.
#[sqlx::test(migrations = "../db/migrations")]
async fn preferences_defaults_and_update(pool: PgPool) {
    let customer = common::create_customer(&pool, "prefs@example.com").await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(customer.id);

    let response = get_auth(&app, "/api/v1/alerts/preferences", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email_enabled"], true);
    assert_eq!(json["data"]["sms_enabled"], false);

    let body = serde_json::json!({ "sms_enabled": true, "fraud_alerts": false });
    let response = put_json_auth(&app, "/api/v1/alerts/preferences", &token, body).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["sms_enabled"], true);
    assert_eq!(json["data"]["fraud_alerts"], false);
    // Untouched fields keep their defaults.
    assert_eq!(json["data"]["email_enabled"], true);

    let response = get_auth(&app, "/api/v1/alerts/preferences", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["sms_enabled"], true);
}
