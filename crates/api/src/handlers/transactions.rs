//! Handlers for the customer `/transactions` resource.

use axum::extract::{Path, State};
use axum::Json;

use cardvault_core::error::CoreError;
use cardvault_core::types::DbId;
use cardvault_db::models::transaction::Transaction;
use cardvault_db::repositories::TransactionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CustomerAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/transactions/{transaction_id}
///
/// Fetch one owned transaction. Someone else's transaction surfaces as 404.
pub async fn get_transaction(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(transaction_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Transaction>>> {
    let transaction =
        TransactionRepo::find_for_customer(&state.pool, transaction_id, auth.customer_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Transaction",
                id: transaction_id,
            }))?;

    Ok(Json(ApiResponse::new(transaction)))
}
