//! Handlers for the `/admin/alerts` queue.

use axum::extract::{Path, Query, State};
use axum::Json;

use cardvault_core::alert::{admin_transition, AlertStatus};
use cardvault_core::audit::{action_types, target_types};
use cardvault_core::error::CoreError;
use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::alert::{Alert, AlertFilter};
use cardvault_db::repositories::{AdminNoteRepo, AlertRepo};

use crate::audit::{self, AuditEntry, ClientInfo};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /admin/alerts`.
#[derive(Debug, serde::Deserialize)]
pub struct AlertQueueParams {
    pub customer_id: Option<DbId>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub action_required: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/alerts
///
/// The alert review queue with optional filters. Requires VIEW_ALERTS.
pub async fn list_alerts(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(params): Query<AlertQueueParams>,
) -> AppResult<Json<Paginated<Alert>>> {
    admin.require(Permission::ViewAlerts)?;

    let filter = AlertFilter {
        customer_id: params.customer_id,
        status: params.status,
        severity: params.severity,
        action_required: params.action_required,
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .limit_offset();

    let alerts = AlertRepo::list_all(&state.pool, &filter, limit, offset).await?;
    let total = AlertRepo::count_all(&state.pool, &filter).await?;

    Ok(Json(Paginated::new(alerts, total, limit, offset)))
}

/// POST /api/v1/admin/alerts/{alert_id}/review
///
/// Mark an alert REVIEWED. Requires MANAGE_ALERTS.
pub async fn review_alert(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(alert_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Alert>>> {
    admin.require(Permission::ManageAlerts)?;
    apply_admin_action(
        &state,
        &admin,
        &client,
        alert_id,
        AlertStatus::Reviewed,
        action_types::ALERT_REVIEW,
        "reviewed",
    )
    .await
}

/// POST /api/v1/admin/alerts/{alert_id}/dismiss
///
/// Resolve (dismiss) an alert. A second dismiss on an already-RESOLVED
/// alert rejects rather than silently succeeding. Requires MANAGE_ALERTS.
pub async fn dismiss_alert(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(alert_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Alert>>> {
    admin.require(Permission::ManageAlerts)?;
    apply_admin_action(
        &state,
        &admin,
        &client,
        alert_id,
        AlertStatus::Resolved,
        action_types::ALERT_DISMISS,
        "dismissed",
    )
    .await
}

/// Shared body for review/dismiss: validate the transition, apply it, append
/// an admin note describing the action, and audit-record.
async fn apply_admin_action(
    state: &AppState,
    admin: &AdminAuth,
    client: &ClientInfo,
    alert_id: DbId,
    target: AlertStatus,
    action_type: &'static str,
    verb: &str,
) -> AppResult<Json<ApiResponse<Alert>>> {
    let alert = AlertRepo::find_by_id(&state.pool, alert_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }))?;

    let current = alert
        .status()
        .ok_or_else(|| AppError::InternalError(format!("Unknown alert status: {}", alert.status)))?;
    let target = admin_transition(current, target)?;

    let updated = AlertRepo::apply_admin_action(&state.pool, alert.id, target, admin.admin_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }))?;

    AdminNoteRepo::create(
        &state.pool,
        admin.admin_id,
        target_types::ALERT,
        updated.id,
        &format!("Alert {verb} by admin {}", admin.admin_id),
    )
    .await?;

    audit::record(
        state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type,
            target_type: target_types::ALERT,
            target_id: updated.id,
            description: format!("Alert {} {verb}", updated.id),
            client,
        },
    );

    Ok(Json(ApiResponse::new(updated)))
}
