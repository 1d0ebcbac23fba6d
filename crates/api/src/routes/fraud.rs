//! Route definitions for the customer `/fraud` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::fraud;
use crate::state::AppState;

/// Routes mounted at `/fraud`.
///
/// ```text
/// POST   /report   -> report_fraud
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/report", post(fraud::report_fraud))
}
