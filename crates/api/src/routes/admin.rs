//! Route definitions for the `/admin` console.
//!
//! Login is public; everything else requires an admin token, with the
//! per-route permission named in the handler.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    admin_alerts, admin_audit, admin_auth, admin_cards, admin_customers, admin_disputes,
    admin_notes, admin_transactions,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /auth/login                 -> admin_auth::login
/// GET    /auth/me                    -> admin_auth::me
///
/// GET    /customers                  -> admin_customers::search_customers
/// GET    /customers/{id}             -> admin_customers::get_customer
/// GET    /customers/{id}/cards       -> admin_customers::customer_cards
///
/// POST   /cards/{id}/lock            -> admin_cards::lock_card
/// POST   /cards/{id}/unlock          -> admin_cards::unlock_card
///
/// GET    /transactions               -> admin_transactions::list_transactions
///
/// GET    /disputes                   -> admin_disputes::list_disputes
/// GET    /disputes/{id}              -> admin_disputes::get_dispute
/// PUT    /disputes/{id}              -> admin_disputes::update_dispute
///
/// GET    /alerts                     -> admin_alerts::list_alerts
/// POST   /alerts/{id}/review         -> admin_alerts::review_alert
/// POST   /alerts/{id}/dismiss        -> admin_alerts::dismiss_alert
///
/// GET    /notes                      -> admin_notes::list_notes
/// POST   /notes                      -> admin_notes::create_note
/// PUT    /notes/{id}                 -> admin_notes::update_note
/// DELETE /notes/{id}                 -> admin_notes::delete_note
///
/// GET    /audit-logs                 -> admin_audit::query_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Authentication.
        .route("/auth/login", post(admin_auth::login))
        .route("/auth/me", get(admin_auth::me))
        // Customer lookup.
        .route("/customers", get(admin_customers::search_customers))
        .route("/customers/{customer_id}", get(admin_customers::get_customer))
        .route(
            "/customers/{customer_id}/cards",
            get(admin_customers::customer_cards),
        )
        // Card actions.
        .route("/cards/{card_id}/lock", post(admin_cards::lock_card))
        .route("/cards/{card_id}/unlock", post(admin_cards::unlock_card))
        // Transaction browse.
        .route("/transactions", get(admin_transactions::list_transactions))
        // Dispute queue.
        .route("/disputes", get(admin_disputes::list_disputes))
        .route(
            "/disputes/{dispute_id}",
            get(admin_disputes::get_dispute).put(admin_disputes::update_dispute),
        )
        // Alert queue.
        .route("/alerts", get(admin_alerts::list_alerts))
        .route("/alerts/{alert_id}/review", post(admin_alerts::review_alert))
        .route(
            "/alerts/{alert_id}/dismiss",
            post(admin_alerts::dismiss_alert),
        )
        // Notes.
        .route(
            "/notes",
            get(admin_notes::list_notes).post(admin_notes::create_note),
        )
        .route(
            "/notes/{note_id}",
            put(admin_notes::update_note).delete(admin_notes::delete_note),
        )
        // Audit trail.
        .route("/audit-logs", get(admin_audit::query_audit_logs))
}
