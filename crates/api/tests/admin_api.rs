//! HTTP-level integration tests for the admin console: RBAC enforcement,
//! card actions, the alert queue, notes, and the audit trail.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use sqlx::PgPool;

use cardvault_core::card::CardStatus;
use cardvault_core::roles::AdminRole;
use common::{
    assert_error, body_json, delete_auth, get_auth, post_auth, post_json, post_json_auth,
    put_json_auth,
};

/// Admin login returns a token plus the role's permission set, and `me`
/// round-trips it.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_login_and_me(pool: PgPool) {
    let admin = common::create_admin(&pool, "sup@example.com", AdminRole::Supervisor).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "sup@example.com", "password": common::TEST_PASSWORD });
    let response = post_json(&app, "/api/v1/admin/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["admin"]["id"], admin.id);
    assert_eq!(json["data"]["admin"]["role"], "SUPERVISOR");
    let perms = json["data"]["permissions"].as_array().unwrap();
    assert!(perms.iter().any(|p| p == "VIEW_AUDIT_LOGS"));
    assert!(!perms.iter().any(|p| p == "MANAGE_ADMINS"));

    let token = json["data"]["token"].as_str().unwrap();
    let response = get_auth(&app, "/api/v1/admin/auth/me", token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["admin"]["id"], admin.id);
}

/// A customer token is not accepted on admin routes.
#[sqlx::test(migrations = "../db/migrations")]
async fn customer_token_rejected_on_admin_route(pool: PgPool) {
    let customer = common::create_customer(&pool, "sneak@example.com").await;
    let app = common::build_test_app(pool);

    let token = common::customer_token(customer.id);
    let response = get_auth(&app, "/api/v1/admin/customers", &token).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "TOKEN_INVALID").await;
}

/// A role without the route's permission gets 403 with the permission name
/// and the acting role echoed back; a role with it succeeds.
#[sqlx::test(migrations = "../db/migrations")]
async fn permission_denied_names_the_permission(pool: PgPool) {
    let customer = common::create_customer(&pool, "rbac@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Locked).await;
    let csr = common::create_admin(&pool, "csr@example.com", AdminRole::Csr).await;
    let analyst = common::create_admin(&pool, "fa@example.com", AdminRole::FraudAnalyst).await;
    let app = common::build_test_app(pool);

    // CSR may lock but not unlock.
    let csr_token = common::admin_token(csr.id, AdminRole::Csr);
    let response = post_auth(
        &app,
        &format!("/api/v1/admin/cards/{}/unlock", card.id),
        &csr_token,
    )
    .await;
    let json = assert_error(response, StatusCode::FORBIDDEN, "PERMISSION_DENIED").await;
    assert_eq!(json["error"]["details"]["required_permission"], "UNLOCK_CARDS");
    assert_eq!(json["error"]["details"]["admin_role"], "CSR");

    // A fraud analyst holds UNLOCK_CARDS.
    let analyst_token = common::admin_token(analyst.id, AdminRole::FraudAnalyst);
    let response = post_auth(
        &app,
        &format!("/api/v1/admin/cards/{}/unlock", card.id),
        &analyst_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ACTIVE");
}

/// Admin card lock follows the same status matrix as the customer path and
/// leaves an audit row.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_lock_writes_audit_row(pool: PgPool) {
    let customer = common::create_customer(&pool, "audit@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let csr = common::create_admin(&pool, "csr2@example.com", AdminRole::Csr).await;
    let supervisor = common::create_admin(&pool, "sup2@example.com", AdminRole::Supervisor).await;
    let app = common::build_test_app(pool.clone());

    let csr_token = common::admin_token(csr.id, AdminRole::Csr);
    let response = post_auth(
        &app,
        &format!("/api/v1/admin/cards/{}/lock", card.id),
        &csr_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The audit write is fire-and-forget; give the spawned task a moment.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let sup_token = common::admin_token(supervisor.id, AdminRole::Supervisor);
    let response = get_auth(
        &app,
        &format!("/api/v1/admin/audit-logs?action_type=card_lock&target_id={}", card.id),
        &sup_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["admin_id"], csr.id);
    assert_eq!(json["data"][0]["target_type"], "card");
    assert_eq!(json["data"][0]["target_id"], card.id);

    // CSR cannot read the audit trail.
    let response = get_auth(&app, "/api/v1/admin/audit-logs", &csr_token).await;
    let json = assert_error(response, StatusCode::FORBIDDEN, "PERMISSION_DENIED").await;
    assert_eq!(json["error"]["details"]["required_permission"], "VIEW_AUDIT_LOGS");
}

/// Dismissing an alert resolves it; a second dismiss is a named 400, not a
/// silent success.
#[sqlx::test(migrations = "../db/migrations")]
async fn alert_double_dismiss_rejected(pool: PgPool) {
    let customer = common::create_customer(&pool, "dismiss@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 1).await;
    let analyst = common::create_admin(&pool, "fa2@example.com", AdminRole::FraudAnalyst).await;
    let app = common::build_test_app(pool);

    // Raise an alert through the fraud path.
    let cust_token = common::customer_token(customer.id);
    let body = serde_json::json!({ "transaction_id": txn.id });
    let response = post_json_auth(&app, "/api/v1/fraud/report", &cust_token, body).await;
    let alert_id = body_json(response).await["data"]["alert"]["id"].as_i64().unwrap();

    let admin_tok = common::admin_token(analyst.id, AdminRole::FraudAnalyst);
    let response = post_auth(
        &app,
        &format!("/api/v1/admin/alerts/{alert_id}/dismiss"),
        &admin_tok,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "RESOLVED");
    assert_eq!(json["data"]["reviewed_by"], analyst.id);
    assert_eq!(json["data"]["action_required"], false);

    let response = post_auth(
        &app,
        &format!("/api/v1/admin/alerts/{alert_id}/dismiss"),
        &admin_tok,
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "ALERT_ALREADY_RESOLVED").await;
}

/// Review stamps the reviewer and appends an admin note describing the
/// action.
#[sqlx::test(migrations = "../db/migrations")]
async fn alert_review_appends_note(pool: PgPool) {
    let customer = common::create_customer(&pool, "review@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let txn = common::create_transaction(&pool, &card, 1).await;
    let analyst = common::create_admin(&pool, "fa3@example.com", AdminRole::FraudAnalyst).await;
    let app = common::build_test_app(pool);

    let cust_token = common::customer_token(customer.id);
    let body = serde_json::json!({ "transaction_id": txn.id });
    let response = post_json_auth(&app, "/api/v1/fraud/report", &cust_token, body).await;
    let alert_id = body_json(response).await["data"]["alert"]["id"].as_i64().unwrap();

    let admin_tok = common::admin_token(analyst.id, AdminRole::FraudAnalyst);
    let response = post_auth(
        &app,
        &format!("/api/v1/admin/alerts/{alert_id}/review"),
        &admin_tok,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "REVIEWED");

    let response = get_auth(
        &app,
        &format!("/api/v1/admin/notes?note_type=alert&reference_id={alert_id}"),
        &admin_tok,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["admin_id"], analyst.id);
}

/// Note updates are restricted to the author or the ADMIN role.
#[sqlx::test(migrations = "../db/migrations")]
async fn note_author_restriction(pool: PgPool) {
    let author = common::create_admin(&pool, "author@example.com", AdminRole::Csr).await;
    let other = common::create_admin(&pool, "other@example.com", AdminRole::Csr).await;
    let root = common::create_admin(&pool, "root2@example.com", AdminRole::Admin).await;
    let app = common::build_test_app(pool);

    let author_tok = common::admin_token(author.id, AdminRole::Csr);
    let body = serde_json::json!({ "note_type": "card", "reference_id": 1, "content": "watch this one" });
    let response = post_json_auth(&app, "/api/v1/admin/notes", &author_tok, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let note_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Another CSR cannot edit it.
    let other_tok = common::admin_token(other.id, AdminRole::Csr);
    let body = serde_json::json!({ "content": "hijacked" });
    let response =
        put_json_auth(&app, &format!("/api/v1/admin/notes/{note_id}"), &other_tok, body).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    // The author can.
    let body = serde_json::json!({ "content": "updated by author" });
    let response =
        put_json_auth(&app, &format!("/api/v1/admin/notes/{note_id}"), &author_tok, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // And the ADMIN role overrides authorship for deletion.
    let root_tok = common::admin_token(root.id, AdminRole::Admin);
    let response = delete_auth(&app, &format!("/api/v1/admin/notes/{note_id}"), &root_tok).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// The admin transaction browse filters on the fraud flag.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_transaction_browse(pool: PgPool) {
    let customer = common::create_customer(&pool, "browse@example.com").await;
    let card = common::create_card(&pool, customer.id, CardStatus::Active).await;
    let clean = common::create_transaction(&pool, &card, 1).await;
    let flagged = common::create_transaction(&pool, &card, 2).await;
    sqlx::query("UPDATE transactions SET fraud_flag = TRUE WHERE id = $1")
        .bind(flagged.id)
        .execute(&pool)
        .await
        .unwrap();
    let analyst = common::create_admin(&pool, "fa4@example.com", AdminRole::FraudAnalyst).await;
    let app = common::build_test_app(pool);

    let token = common::admin_token(analyst.id, AdminRole::FraudAnalyst);
    let response = get_auth(&app, "/api/v1/admin/transactions?fraud_flag=true", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["id"], flagged.id);
    assert_ne!(json["data"][0]["id"], clean.id);
}

/// Customer search paginates and filters by substring.
#[sqlx::test(migrations = "../db/migrations")]
async fn customer_search(pool: PgPool) {
    for i in 0..5 {
        common::create_customer(&pool, &format!("search-{i}@example.com")).await;
    }
    common::create_customer(&pool, "needle@example.com").await;
    let csr = common::create_admin(&pool, "csr3@example.com", AdminRole::Csr).await;
    let app = common::build_test_app(pool);

    let token = common::admin_token(csr.id, AdminRole::Csr);
    let response = get_auth(&app, "/api/v1/admin/customers?limit=4&offset=0", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);
    assert_eq!(json["pagination"]["total"], 6);
    assert_eq!(json["pagination"]["has_more"], true);

    let response = get_auth(&app, "/api/v1/admin/customers?q=needle", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["email"], "needle@example.com");
}
