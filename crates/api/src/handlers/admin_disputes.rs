//! Handlers for the `/admin/disputes` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use cardvault_core::audit::{action_types, target_types};
use cardvault_core::dispute::DisputeStatus;
use cardvault_core::error::CoreError;
use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::dispute::{DisputeResponse, UpdateDisputeStatus};
use cardvault_db::repositories::DisputeRepo;

use crate::audit::{self, AuditEntry, ClientInfo};
use crate::error::{AppError, AppResult};
use crate::handlers::disputes::DisputeDetail;
use crate::middleware::auth::AdminAuth;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /admin/disputes`.
#[derive(Debug, Deserialize)]
pub struct DisputeQueueParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/disputes
///
/// The dispute work queue, oldest open first, optionally filtered by status.
/// Requires VIEW_DISPUTES.
pub async fn list_disputes(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(params): Query<DisputeQueueParams>,
) -> AppResult<Json<Paginated<DisputeResponse>>> {
    admin.require(Permission::ViewDisputes)?;

    // An unknown status filter is a client error, not an empty page.
    if let Some(ref status) = params.status {
        if DisputeStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown dispute status: {status}"
            ))));
        }
    }

    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .limit_offset();

    let disputes = DisputeRepo::list_all(&state.pool, params.status.as_deref(), limit, offset).await?;
    let total = DisputeRepo::count_all(&state.pool, params.status.as_deref()).await?;

    let now = Utc::now();
    let responses = disputes.iter().map(|d| d.to_response(now)).collect();

    Ok(Json(Paginated::new(responses, total, limit, offset)))
}

/// GET /api/v1/admin/disputes/{dispute_id}
///
/// Fetch one dispute with its timeline. Requires VIEW_DISPUTES.
pub async fn get_dispute(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(dispute_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DisputeDetail>>> {
    admin.require(Permission::ViewDisputes)?;

    let dispute = DisputeRepo::find_by_id(&state.pool, dispute_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dispute",
            id: dispute_id,
        }))?;

    let timeline = DisputeRepo::timeline(&state.pool, dispute.id).await?;

    Ok(Json(ApiResponse::new(DisputeDetail {
        dispute: dispute.to_response(Utc::now()),
        timeline,
    })))
}

/// PUT /api/v1/admin/disputes/{dispute_id}
///
/// Move a dispute to a new status. Transitions into RESOLVED or DENIED
/// stamp the resolution date and resolver id. Requires MANAGE_DISPUTES.
pub async fn update_dispute(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(dispute_id): Path<DbId>,
    Json(input): Json<UpdateDisputeStatus>,
) -> AppResult<Json<ApiResponse<DisputeResponse>>> {
    admin.require(Permission::ManageDisputes)?;

    let new_status = DisputeStatus::parse(&input.status).ok_or_else(|| {
        AppError::Core(CoreError::BusinessRule {
            code: "INVALID_STATUS",
            message: format!(
                "Dispute status must be one of SUBMITTED, UNDER_REVIEW, RESOLVED, DENIED; got {}",
                input.status
            ),
        })
    })?;

    // Existence check first so an unknown dispute 404s before any write.
    DisputeRepo::find_by_id(&state.pool, dispute_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dispute",
            id: dispute_id,
        }))?;

    let updated = DisputeRepo::update_status(
        &state.pool,
        dispute_id,
        new_status,
        input.resolution_note.as_deref(),
        admin.admin_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Dispute",
        id: dispute_id,
    }))?;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type: action_types::DISPUTE_UPDATE,
            target_type: target_types::DISPUTE,
            target_id: updated.id,
            description: format!("Dispute {} moved to {}", updated.id, new_status),
            client: &client,
        },
    );

    Ok(Json(ApiResponse::new(updated.to_response(Utc::now()))))
}
