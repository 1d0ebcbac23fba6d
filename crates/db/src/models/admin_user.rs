//! Admin user entity and DTOs.

use cardvault_core::roles::AdminRole;
use cardvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An admin user row. The `role` string maps to a static permission set;
/// see `cardvault_core::roles`.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AdminUser {
    /// The typed role, or `None` if the stored string is unknown.
    pub fn role(&self) -> Option<AdminRole> {
        AdminRole::parse(&self.role)
    }
}

/// DTO for creating an admin user (seed / provisioning path).
#[derive(Debug, Clone)]
pub struct CreateAdminUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AdminRole,
}

/// Safe projection of an admin user for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
}

impl From<&AdminUser> for AdminUserResponse {
    fn from(a: &AdminUser) -> Self {
        AdminUserResponse {
            id: a.id,
            email: a.email.clone(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            role: a.role.clone(),
            is_active: a.is_active,
            last_login_at: a.last_login_at,
        }
    }
}
