//! Repository for the `admin_users` table.

use sqlx::PgPool;

use cardvault_core::types::DbId;

use crate::models::admin_user::{AdminUser, CreateAdminUser};

/// Column list for `admin_users` queries.
const COLUMNS: &str = "\
    id, email, password_hash, first_name, last_name, role, \
    is_active, last_login_at, created_at, updated_at";

/// Provides lookup operations for admin users.
pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Insert a new admin user (seed / provisioning path).
    pub async fn create(pool: &PgPool, dto: &CreateAdminUser) -> Result<AdminUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (email, password_hash, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&dto.email)
            .bind(&dto.password_hash)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an admin by email (login path).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE email = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE id = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_login_at` on successful authentication.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
