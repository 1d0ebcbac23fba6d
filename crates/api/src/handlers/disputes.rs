//! Handlers for the customer `/disputes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use cardvault_core::dispute::{check_filing_eligibility, FilingCandidate};
use cardvault_core::error::CoreError;
use cardvault_core::types::DbId;
use cardvault_db::models::dispute::{
    CreateDispute, DisputeResponse, DisputeTimelineEntry,
};
use cardvault_db::repositories::{DisputeRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CustomerAuth;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /disputes`.
#[derive(Debug, Deserialize)]
pub struct FileDisputeRequest {
    pub transaction_id: DbId,
    pub reason: String,
    pub description: Option<String>,
}

/// Dispute detail payload: the dispute plus its status timeline.
#[derive(Debug, Serialize)]
pub struct DisputeDetail {
    pub dispute: DisputeResponse,
    pub timeline: Vec<DisputeTimelineEntry>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/disputes
///
/// File a dispute against an owned, APPROVED transaction within the filing
/// window. The insert, the `is_disputed` flip, and the timeline entry land
/// in one database transaction; the unique constraint on `transaction_id`
/// backstops concurrent double-filing.
pub async fn file_dispute(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Json(input): Json<FileDisputeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DisputeResponse>>)> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "reason must not be empty".into(),
        )));
    }

    let transaction =
        TransactionRepo::find_for_customer(&state.pool, input.transaction_id, auth.customer_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Transaction",
                id: input.transaction_id,
            }))?;

    let already_disputed = transaction.is_disputed
        || DisputeRepo::exists_for_transaction(&state.pool, transaction.id).await?;

    check_filing_eligibility(
        &FilingCandidate {
            transaction_approved: transaction.is_approved(),
            transaction_date: transaction.transaction_date,
            already_disputed,
        },
        Utc::now(),
    )?;

    let dispute = DisputeRepo::file(
        &state.pool,
        &CreateDispute {
            transaction_id: transaction.id,
            customer_id: auth.customer_id,
            reason: input.reason,
            description: input.description,
        },
    )
    .await?;

    state
        .corebank
        .submit_dispute_claim(dispute.id, transaction.id, transaction.amount_cents)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(dispute.to_response(Utc::now()))),
    ))
}

/// GET /api/v1/disputes
///
/// Paginated listing of the authenticated customer's disputes.
pub async fn list_disputes(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<DisputeResponse>>> {
    let (limit, offset) = params.limit_offset();

    let disputes =
        DisputeRepo::list_for_customer(&state.pool, auth.customer_id, limit, offset).await?;
    let total = DisputeRepo::count_for_customer(&state.pool, auth.customer_id).await?;

    let now = Utc::now();
    let responses = disputes.iter().map(|d| d.to_response(now)).collect();

    Ok(Json(Paginated::new(responses, total, limit, offset)))
}

/// GET /api/v1/disputes/{dispute_id}
///
/// Fetch one owned dispute with its timeline.
pub async fn get_dispute(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(dispute_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DisputeDetail>>> {
    let dispute = DisputeRepo::find_for_customer(&state.pool, dispute_id, auth.customer_id)
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
