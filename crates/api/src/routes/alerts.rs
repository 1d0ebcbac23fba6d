//! Route definitions for the customer `/alerts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET    /               -> list_alerts
/// POST   /{id}/read      -> read_alert
/// GET    /preferences    -> get_preferences
/// PUT    /preferences    -> update_preferences
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list_alerts))
        // Registered before the `{alert_id}` tree so "preferences" never
        // parses as an id.
        .route(
            "/preferences",
            get(alerts::get_preferences).put(alerts::update_preferences),
        )
        .route("/{alert_id}/read", post(alerts::read_alert))
}
