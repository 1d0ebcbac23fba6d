//! Handlers for the customer `/alerts` resource and delivery preferences.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;

use cardvault_core::alert::read_transition;
use cardvault_core::error::CoreError;
use cardvault_core::types::DbId;
use cardvault_db::models::alert::{Alert, AlertPreferences, UpdateAlertPreferences};
use cardvault_db::repositories::{AlertPreferenceRepo, AlertRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CustomerAuth;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

/// GET /api/v1/alerts
///
/// Paginated listing of the authenticated customer's alerts, newest first.
pub async fn list_alerts(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Alert>>> {
    let (limit, offset) = params.limit_offset();

    let alerts = AlertRepo::list_for_customer(&state.pool, auth.customer_id, limit, offset).await?;
    let total = AlertRepo::count_for_customer(&state.pool, auth.customer_id).await?;

    Ok(Json(Paginated::new(alerts, total, limit, offset)))
}

/// POST /api/v1/alerts/{alert_id}/read
///
/// Mark an owned alert as read. Idempotent on an already-read alert; alerts
/// an admin has handled reject.
pub async fn read_alert(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(alert_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Alert>>> {
    let alert = AlertRepo::find_for_customer(&state.pool, alert_id, auth.customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }))?;

    let current = alert
        .status()
        .ok_or_else(|| AppError::InternalError(format!("Unknown alert status: {}", alert.status)))?;
    let target = read_transition(current)?;

    let updated = AlertRepo::set_status(&state.pool, alert.id, target)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }))?;

    Ok(Json(ApiResponse::new(updated)))
}

/// GET /api/v1/alerts/preferences
///
/// Fetch the customer's delivery preferences; a missing row resolves to the
/// defaults.
pub async fn get_preferences(
    State(state): State<AppState>,
    auth: CustomerAuth,
) -> AppResult<Json<ApiResponse<AlertPreferences>>> {
    let prefs = AlertPreferenceRepo::find(&state.pool, auth.customer_id)
        .await?
        .unwrap_or_else(|| AlertPreferences::defaults(auth.customer_id, Utc::now()));

    Ok(Json(ApiResponse::new(prefs)))
}

/// PUT /api/v1/alerts/preferences
///
/// Update delivery preferences. Absent fields keep their current value.
pub async fn update_preferences(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Json(input): Json<UpdateAlertPreferences>,
) -> AppResult<Json<ApiResponse<AlertPreferences>>> {
    let prefs = AlertPreferenceRepo::upsert(&state.pool, auth.customer_id, &input).await?;
    Ok(Json(ApiResponse::new(prefs)))
}
