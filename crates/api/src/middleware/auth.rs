//! Authentication extractors for Axum handlers.
//!
//! [`CustomerAuth`] and [`AdminAuth`] verify the bearer token against the
//! matching secret, resolve the principal from storage, and attach it to the
//! handler. The two namespaces are disjoint: a customer token is never
//! accepted on an admin route and vice versa.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cardvault_core::error::{auth_codes, CoreError};
use cardvault_core::roles::{role_has, AdminRole, Permission};
use cardvault_core::types::DbId;
use cardvault_db::models::customer::Customer;
use cardvault_db::repositories::{AdminUserRepo, CustomerRepo};

use crate::auth::jwt::{validate_admin_token, validate_customer_token};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::unauthorized(
                auth_codes::TOKEN_REQUIRED,
                "Authorization token required",
            ))
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::unauthorized(
            auth_codes::TOKEN_INVALID,
            "Invalid Authorization format. Expected: Bearer <token>",
        ))
    })
}

/// Authenticated customer extracted from a bearer token.
///
/// The customer row is loaded from storage so downstream handlers can trust
/// `is_active` and profile fields without another query:
///
/// ```ignore
/// async fn my_handler(auth: CustomerAuth) -> AppResult<Json<()>> {
///     tracing::info!(customer_id = auth.customer_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CustomerAuth {
    /// The customer's internal database id (from `claims.sub`).
    pub customer_id: DbId,
    /// The full customer row resolved during authentication.
    pub customer: Customer,
}

impl FromRequestParts<AppState> for CustomerAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_customer_token(token, &state.config.jwt)?;

        let customer = CustomerRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::unauthorized(
                    auth_codes::TOKEN_INVALID,
                    "Invalid token",
                ))
            })?;

        if !customer.is_active {
            return Err(AppError::Core(CoreError::account_disabled()));
        }

        Ok(CustomerAuth {
            customer_id: customer.id,
            customer,
        })
    }
}

/// Authenticated admin extracted from a bearer token.
///
/// Carries the typed role so handlers can run the permission guard:
///
/// ```ignore
/// async fn lock(admin: AdminAuth) -> AppResult<Json<()>> {
///     admin.require(Permission::LockCards)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// The admin's internal database id (from `claims.sub`).
    pub admin_id: DbId,
    /// The admin's typed role.
    pub role: AdminRole,
}

impl AdminAuth {
    /// Permission guard: pass through iff the role's static set contains
    /// `permission`, else reject with 403 naming the missing permission and
    /// the acting role.
    pub fn require(&self, permission: Permission) -> AppResult<()> {
        if role_has(self.role, permission) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied {
                required: permission,
                role: self.role,
            })
        }
    }

    /// Whether this admin holds the ADMIN role (used for author-override
    /// checks on notes).
    pub fn is_admin(&self) -> bool {
        self.role == AdminRole::Admin
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_admin_token(token, &state.config.jwt)?;

        let admin = AdminUserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::unauthorized(
                    auth_codes::TOKEN_INVALID,
                    "Invalid token",
                ))
            })?;

        if !admin.is_active {
            return Err(AppError::Core(CoreError::account_disabled()));
        }

        // The stored role is authoritative over the claim: a role change
        // takes effect on the next request, not the next login.
        let role = admin.role().ok_or_else(|| {
            AppError::InternalError(format!("Unknown admin role: {}", admin.role))
        })?;

        Ok(AdminAuth {
            admin_id: admin.id,
            role,
        })
    }
}
