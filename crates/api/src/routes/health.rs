//! Root-level health check.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Routes mounted at the application root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Liveness plus a database round trip.
async fn health(State(state): State<AppState>) -> AppResult<Json<ApiResponse<&'static str>>> {
    cardvault_db::health_check(&state.pool).await?;
    Ok(Json(ApiResponse::new("ok")))
}
