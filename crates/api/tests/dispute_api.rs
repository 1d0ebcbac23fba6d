//! HTTP-level integration tests for dispute filing and admin resolution.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use cardvault_core::card::CardStatus;
use cardvault_core::roles::AdminRole;
use common::{assert_error, body_json, get_auth, post_json_auth, put_json_auth};

/// Filing a dispute inserts the row, flips the transaction's dispute flag,
/// and seeds the timeline -- all visible afterwards.
#[sqlx::test(migrations = "../db/migrations")]
async fn file_dispute_success(pool: PgPool) {
    let customer = common::create_customer(&pool, "file@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 5).await;
    let app = common::build_test_app(pool.clone());
    let token = common::customer_token(customer.id);

    let body = serde_json::json!({
        "transaction_id": txn.id,
        "reason": "Unrecognized charge",
        "description": "I have never shopped there",
    });
    let response = post_json_auth(&app, "/api/v1/disputes", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "SUBMITTED");
    assert_eq!(json["data"]["transaction_id"], txn.id);
    assert_eq!(json["data"]["days_open"], 0);
    let dispute_id = json["data"]["id"].as_i64().unwrap();

    // The transaction flag flipped in the same database transaction.
    let flagged: bool =
        sqlx::query_scalar("SELECT is_disputed FROM transactions WHERE id = $1")
            .bind(txn.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(flagged);

    // The detail view includes the initial timeline entry.
    let response = get_auth(&app, &format!("/api/v1/disputes/{dispute_id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["timeline"][0]["status"], "SUBMITTED");
    assert_eq!(json["data"]["timeline"][0]["actor_type"], "customer");
}

/// Filing the same transaction twice conflicts on the second attempt.
#[sqlx::test(migrations = "../db/migrations")]
async fn file_dispute_twice(pool: PgPool) {
    let customer = common::create_customer(&pool, "twice@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 5).await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(customer.id);

    let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Unrecognized charge" });
    let response = post_json_auth(&app, "/api/v1/disputes", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(&app, "/api/v1/disputes", &token, body).await;
    assert_error(response, StatusCode::CONFLICT, "TRANSACTION_ALREADY_DISPUTED").await;
}

/// Transactions older than the 60-day window are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn file_dispute_window_expired(pool: PgPool) {
    let customer = common::create_customer(&pool, "old@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 61).await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(customer.id);

    let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Too late" });
    let response = post_json_auth(&app, "/api/v1/disputes", &token, body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "DISPUTE_WINDOW_EXPIRED").await;
}

/// Only APPROVED transactions are eligible.
#[sqlx::test(migrations = "../db/migrations")]
async fn file_dispute_requires_approved(pool: PgPool) {
    let customer = common::create_customer(&pool, "declined@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction_with_status(&pool, &card, 5, "DECLINED").await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(customer.id);

    let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Not mine" });
    let response = post_json_auth(&app, "/api/v1/disputes", &token, body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "TRANSACTION_NOT_ELIGIBLE").await;
}

/// Disputing someone else's transaction is indistinguishable from a missing
/// one.
#[sqlx::test(migrations = "../db/migrations")]
async fn file_dispute_ownership(pool: PgPool) {
    let alice = common::create_customer(&pool, "d-alice@example.com").await;
    let bob = common::create_customer(&pool, "d-bob@example.com").await;
    let bobs_card = common::create_card(&pool, bob.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &bobs_card, 5).await;
    let app = common::build_test_app(pool);
    let token = common::customer_token(alice.id);

    let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Not mine" });
    let response = post_json_auth(&app, "/api/v1/disputes", &token, body).await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

/// An admin resolving a dispute stamps the resolver, the resolution date,
/// and appends a timeline entry.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_resolves_dispute(pool: PgPool) {
    let customer = common::create_customer(&pool, "resolve@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 5).await;
    let analyst = common::create_admin(&pool, "analyst@example.com", AdminRole::FraudAnalyst).await;
    let app = common::build_test_app(pool);

    let customer_tok = common::customer_token(customer.id);
    let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Unrecognized charge" });
    let response = post_json_auth(&app, "/api/v1/disputes", &customer_tok, body).await;
    let dispute_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let admin_tok = common::admin_token(analyst.id, AdminRole::FraudAnalyst);
    let body = serde_json::json!({ "status": "RESOLVED", "resolution_note": "Chargeback issued" });
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/disputes/{dispute_id}"),
        &admin_tok,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "RESOLVED");
    assert_eq!(json["data"]["resolved_by"], analyst.id);
    assert!(json["data"]["resolved_at"].is_string());
    assert_eq!(json["data"]["resolution_note"], "Chargeback issued");

    // Timeline gained the admin entry.
    let response = get_auth(
        &app,
        &format!("/api/v1/admin/disputes/{dispute_id}"),
        &admin_tok,
    )
    .await;
    let json = body_json(response).await;
    let timeline = json["data"]["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[1]["status"], "RESOLVED");
    assert_eq!(timeline[1]["actor_type"], "admin");
}

/// An unknown status string on the admin update is a named 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_update_rejects_unknown_status(pool: PgPool) {
    let customer = common::create_customer(&pool, "badstatus@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 5).await;
    let analyst = common::create_admin(&pool, "an2@example.com", AdminRole::FraudAnalyst).await;
    let app = common::build_test_app(pool);

    let customer_tok = common::customer_token(customer.id);
    let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Unrecognized charge" });
    let response = post_json_auth(&app, "/api/v1/disputes", &customer_tok, body).await;
    let dispute_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let admin_tok = common::admin_token(analyst.id, AdminRole::FraudAnalyst);
    let body = serde_json::json!({ "status": "ESCALATED" });
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/disputes/{dispute_id}"),
        &admin_tok,
        body,
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_STATUS").await;
}

/// The customer dispute listing derives days_open and paginates.
#[sqlx::test(migrations = "../db/migrations")]
async fn customer_dispute_listing(pool: PgPool) {
    let customer = common::create_customer(&pool, "list@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let app = common::build_test_app(pool.clone());
    let token = common::customer_token(customer.id);

    for day in 0..3 {
        let txn = common::create_transaction(&pool, &card, day).await;
        let body = serde_json::json!({ "transaction_id": txn.id, "reason": "Unrecognized charge" });
        let response = post_json_auth(&app, "/api/v1/disputes", &token, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(&app, "/api/v1/disputes?limit=2&offset=0", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["has_more"], true);
    assert!(json["data"][0]["days_open"].is_number());
}
