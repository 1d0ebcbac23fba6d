pub mod admin;
pub mod alerts;
pub mod auth;
pub mod cards;
pub mod disputes;
pub mod fraud;
pub mod health;
pub mod transactions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/me                                 who am I (customer token)
/// /auth/profile                            update profile (PUT)
///
/// /cards                                   list own cards
/// /cards/{id}                              get card + controls, update controls (PUT)
/// /cards/{id}/controls                     update controls (PUT alias)
/// /cards/{id}/lock                         lock (POST)
/// /cards/{id}/unlock                       unlock (POST)
/// /cards/{id}/transactions                 paginated transactions
///
/// /transactions/{id}                       get one owned transaction
///
/// /disputes                                file (POST), list own (GET)
/// /disputes/{id}                           get with timeline
///
/// /alerts                                  list own alerts
/// /alerts/{id}/read                        mark read (POST)
/// /alerts/preferences                      get, update delivery prefs
///
/// /fraud/report                            report fraud (POST)
///
/// /admin/auth/login                        admin login (public)
/// /admin/auth/me                           admin who am I
/// /admin/customers                         search (VIEW_CUSTOMERS)
/// /admin/customers/{id}                    get (VIEW_CUSTOMERS)
/// /admin/customers/{id}/cards              cards (VIEW_CARDS)
/// /admin/cards/{id}/lock                   lock (LOCK_CARDS)
/// /admin/cards/{id}/unlock                 unlock (UNLOCK_CARDS)
/// /admin/transactions                      browse (VIEW_TRANSACTIONS)
/// /admin/disputes                          queue (VIEW_DISPUTES)
/// /admin/disputes/{id}                     get (VIEW_DISPUTES), update (MANAGE_DISPUTES)
/// /admin/alerts                            queue (VIEW_ALERTS)
/// /admin/alerts/{id}/review                review (MANAGE_ALERTS)
/// /admin/alerts/{id}/dismiss               dismiss (MANAGE_ALERTS)
/// /admin/notes                             list, create (MANAGE_NOTES)
/// /admin/notes/{id}                        update, delete (author or ADMIN)
/// /admin/audit-logs                        browse (VIEW_AUDIT_LOGS)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Customer authentication and profile.
        .nest("/auth", auth::router())
        // Card listing, controls, lock/unlock, transactions.
        .nest("/cards", cards::router())
        // Single-transaction lookup.
        .nest("/transactions", transactions::router())
        // Dispute filing and tracking.
        .nest("/disputes", disputes::router())
        // Alerts and delivery preferences.
        .nest("/alerts", alerts::router())
        // Customer fraud reports.
        .nest("/fraud", fraud::router())
        // Admin console routes (RBAC-guarded).
        .nest("/admin", admin::router())
}
