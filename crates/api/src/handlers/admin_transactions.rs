//! Handler for the `/admin/transactions` browse endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::transaction::{Transaction, TransactionFilter};
use cardvault_db::repositories::TransactionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AdminAuth;
use crate::query::PaginationParams;
use crate::response::Paginated;
use crate::state::AppState;

/// Query parameters for `GET /admin/transactions`.
#[derive(Debug, Deserialize)]
pub struct TransactionBrowseParams {
    pub customer_id: Option<DbId>,
    pub card_id: Option<DbId>,
    pub status: Option<String>,
    pub fraud_flag: Option<bool>,
    pub is_disputed: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/transactions
///
/// Browse transactions across customers with filters and pagination (the
/// fraud review workflow lives here). Requires VIEW_TRANSACTIONS.
pub async fn list_transactions(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(params): Query<TransactionBrowseParams>,
) -> AppResult<Json<Paginated<Transaction>>> {
    admin.require(Permission::ViewTransactions)?;

    let filter = TransactionFilter {
        card_id: params.card_id,
        customer_id: params.customer_id,
        status: params.status,
        fraud_flag: params.fraud_flag,
        is_disputed: params.is_disputed,
        from: None,
        to: None,
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .limit_offset();

    let transactions = TransactionRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = TransactionRepo::count(&state.pool, &filter).await?;

    Ok(Json(Paginated::new(transactions, total, limit, offset)))
}
