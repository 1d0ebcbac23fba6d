//! Handlers for the customer `/auth` resource (login, profile).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use cardvault_core::error::{auth_codes, CoreError};
use cardvault_db::models::customer::{CustomerResponse, UpdateCustomerProfile};
use cardvault_db::repositories::CustomerRepo;

use crate::auth::jwt::generate_customer_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CustomerAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub customer: CustomerResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns a bearer token and the
/// customer profile.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    // The same 401 covers unknown email and wrong password so the endpoint
    // does not leak which emails exist.
    let customer = CustomerRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::unauthorized(
                auth_codes::INVALID_CREDENTIALS,
                "Invalid email or password",
            ))
        })?;

    if !customer.is_active {
        return Err(AppError::Core(CoreError::account_disabled()));
    }

    let password_valid = verify_password(&input.password, &customer.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::unauthorized(
            auth_codes::INVALID_CREDENTIALS,
            "Invalid email or password",
        )));
    }

    CustomerRepo::record_login(&state.pool, customer.id).await?;

    let token = generate_customer_token(customer.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(ApiResponse::new(LoginResponse {
        token,
        expires_in: state.config.jwt.expires_in_mins * 60,
        customer: CustomerResponse::from(&customer),
    })))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated customer's profile.
pub async fn me(auth: CustomerAuth) -> AppResult<Json<ApiResponse<CustomerResponse>>> {
    Ok(Json(ApiResponse::new(CustomerResponse::from(&auth.customer))))
}

/// PUT /api/v1/auth/profile
///
/// Update contact fields on the authenticated customer's profile.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Json(input): Json<UpdateCustomerProfile>,
) -> AppResult<Json<ApiResponse<CustomerResponse>>> {
    if let Some(ref first_name) = input.first_name {
        if first_name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "first_name must not be empty".into(),
            )));
        }
    }
    if let Some(ref last_name) = input.last_name {
        if last_name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "last_name must not be empty".into(),
            )));
        }
    }

    let customer = CustomerRepo::update_profile(&state.pool, auth.customer_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: auth.customer_id,
        }))?;

    Ok(Json(ApiResponse::new(CustomerResponse::from(&customer))))
}
