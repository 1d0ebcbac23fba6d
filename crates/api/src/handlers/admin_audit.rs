//! Handler for the `/admin/audit-logs` browse endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::audit::{AuditLog, AuditQuery};
use cardvault_db::repositories::AuditLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::query::PaginationParams;
use crate::response::Paginated;
use crate::state::AppState;

/// Query parameters for `GET /admin/audit-logs`.
#[derive(Debug, Deserialize)]
pub struct AuditLogQueryParams {
    pub admin_id: Option<DbId>,
    pub action_type: Option<String>,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    /// ISO 8601 lower bound on `created_at`.
    pub from: Option<String>,
    /// ISO 8601 upper bound on `created_at`.
    pub to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Parse an optional ISO 8601 timestamp query parameter.
fn parse_timestamp(s: &Option<String>) -> AppResult<Option<chrono::DateTime<chrono::Utc>>> {
    match s {
        Some(v) => v
            .parse::<chrono::DateTime<chrono::Utc>>()
            .map(Some)
            .map_err(|_| AppError::BadRequest("Invalid date format".into())),
        None => Ok(None),
    }
}

/// GET /api/v1/admin/audit-logs
///
/// Browse the audit trail with filters and pagination. Requires
/// VIEW_AUDIT_LOGS.
pub async fn query_audit_logs(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(params): Query<AuditLogQueryParams>,
) -> AppResult<Json<Paginated<AuditLog>>> {
    admin.require(Permission::ViewAuditLogs)?;

    let query = AuditQuery {
        admin_id: params.admin_id,
        action_type: params.action_type,
        target_type: params.target_type,
        target_id: params.target_id,
        from: parse_timestamp(&params.from)?,
        to: parse_timestamp(&params.to)?,
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .limit_offset();

    let logs = AuditLogRepo::query(&state.pool, &query, limit, offset).await?;
    let total = AuditLogRepo::count(&state.pool, &query).await?;

    Ok(Json(Paginated::new(logs, total, limit, offset)))
}
