//! Route definitions for the customer `/transactions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

/// Routes mounted at `/transactions`.
///
/// ```text
/// GET    /{id}   -> get_transaction
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{transaction_id}", get(transactions::get_transaction))
}
