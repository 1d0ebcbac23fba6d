//! Handlers for the `/admin/customers` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use cardvault_core::error::CoreError;
use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::card::CardResponse;
use cardvault_db::models::customer::CustomerResponse;
use cardvault_db::repositories::{CardRepo, CustomerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /admin/customers`.
#[derive(Debug, Deserialize)]
pub struct CustomerSearchParams {
    /// Case-insensitive substring match over email and name.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/customers
///
/// Search customers by name or email, paginated. Requires VIEW_CUSTOMERS.
pub async fn search_customers(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(params): Query<CustomerSearchParams>,
) -> AppResult<Json<Paginated<CustomerResponse>>> {
    admin.require(Permission::ViewCustomers)?;

    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .limit_offset();
    let term = params.q.as_deref().filter(|q| !q.trim().is_empty());

    let customers = CustomerRepo::search(&state.pool, term, limit, offset).await?;
    let total = CustomerRepo::search_count(&state.pool, term).await?;

    let responses = customers.iter().map(CustomerResponse::from).collect();
    Ok(Json(Paginated::new(responses, total, limit, offset)))
}

/// GET /api/v1/admin/customers/{customer_id}
///
/// Fetch one customer. Requires VIEW_CUSTOMERS.
pub async fn get_customer(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(customer_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CustomerResponse>>> {
    admin.require(Permission::ViewCustomers)?;

    let customer = CustomerRepo::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: customer_id,
        }))?;

    Ok(Json(ApiResponse::new(CustomerResponse::from(&customer))))
}

/// GET /api/v1/admin/customers/{customer_id}/cards
///
/// List a customer's cards. Requires VIEW_CARDS.
pub async fn customer_cards(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(customer_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<CardResponse>>>> {
    admin.require(Permission::ViewCards)?;

    // 404 for an unknown customer rather than an empty list.
    CustomerRepo::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: customer_id,
        }))?;

    let cards = CardRepo::list_for_customer(&state.pool, customer_id).await?;
    let responses = cards.iter().map(CardResponse::from).collect();

    Ok(Json(ApiResponse::new(responses)))
}
