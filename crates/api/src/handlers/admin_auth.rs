//! Handlers for the `/admin/auth` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use cardvault_core::audit::{action_types, target_types};
use cardvault_core::error::{auth_codes, CoreError};
use cardvault_db::models::admin_user::AdminUserResponse;
use cardvault_db::repositories::AdminUserRepo;

use crate::audit::{self, AuditEntry, ClientInfo};
use crate::auth::jwt::generate_admin_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/auth/login`.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful admin authentication payload.
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminUserResponse,
    /// The permission labels granted by the admin's role, so the console can
    /// hide actions the role cannot perform.
    pub permissions: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/auth/login
///
/// Authenticate an admin with email + password. Successful logins are
/// audit-recorded.
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(input): Json<AdminLoginRequest>,
) -> AppResult<Json<ApiResponse<AdminLoginResponse>>> {
    let admin = AdminUserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::unauthorized(
                auth_codes::INVALID_CREDENTIALS,
                "Invalid email or password",
            ))
        })?;

    if !admin.is_active {
        return Err(AppError::Core(CoreError::account_disabled()));
    }

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::unauthorized(
            auth_codes::INVALID_CREDENTIALS,
            "Invalid email or password",
        )));
    }

    let role = admin
        .role()
        .ok_or_else(|| AppError::InternalError(format!("Unknown admin role: {}", admin.role)))?;

    AdminUserRepo::record_login(&state.pool, admin.id).await?;

    let token = generate_admin_token(admin.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.id,
            action_type: action_types::LOGIN,
            target_type: target_types::ADMIN_USER,
            target_id: admin.id,
            description: format!("Admin {} logged in", admin.email),
            client: &client,
        },
    );

    let permissions = cardvault_core::roles::permissions_for(role)
        .iter()
        .map(|p| p.as_str())
        .collect();

    Ok(Json(ApiResponse::new(AdminLoginResponse {
        token,
        expires_in: state.config.jwt.expires_in_mins * 60,
        admin: AdminUserResponse::from(&admin),
        permissions,
    })))
}

/// Payload for `GET /admin/auth/me`.
#[derive(Debug, Serialize)]
pub struct AdminMeResponse {
    pub admin: AdminUserResponse,
    pub permissions: Vec<&'static str>,
}

/// GET /api/v1/admin/auth/me
///
/// Return the authenticated admin's profile and permission set.
pub async fn me(
    State(state): State<AppState>,
    admin: AdminAuth,
) -> AppResult<Json<ApiResponse<AdminMeResponse>>> {
    let row = AdminUserRepo::find_by_id(&state.pool, admin.admin_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminUser",
            id: admin.admin_id,
        }))?;

    let permissions = cardvault_core::roles::permissions_for(admin.role)
        .iter()
        .map(|p| p.as_str())
        .collect();

    Ok(Json(ApiResponse::new(AdminMeResponse {
        admin: AdminUserResponse::from(&row),
        permissions,
    })))
}
