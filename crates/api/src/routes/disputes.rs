//! Route definitions for the customer `/disputes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::disputes;
use crate::state::AppState;

/// Routes mounted at `/disputes`.
///
/// ```text
/// POST   /        -> file_dispute
/// GET    /        -> list_disputes
/// GET    /{id}    -> get_dispute
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(disputes::list_disputes).post(disputes::file_dispute),
        )
        .route("/{dispute_id}", get(disputes::get_dispute))
}
