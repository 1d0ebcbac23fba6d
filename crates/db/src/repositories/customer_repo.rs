//! Repository for the `customers` table.

use sqlx::PgPool;

use cardvault_core::types::DbId;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomerProfile};

/// Column list for `customers` queries.
const COLUMNS: &str = "\
    id, email, password_hash, first_name, last_name, phone, \
    is_active, last_login_at, created_at, updated_at";

/// Provides lookup and profile operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer (signup / seed path).
    pub async fn create(pool: &PgPool, dto: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (email, password_hash, first_name, last_name, phone) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&dto.email)
            .bind(&dto.password_hash)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(&dto.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a customer by email (login path).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE email = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_login_at` on successful authentication.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE customers SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update profile fields, returning the fresh row. Absent fields keep
    /// their current value via COALESCE.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateCustomerProfile,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                phone = COALESCE($4, phone), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(&dto.phone)
            .fetch_optional(pool)
            .await
    }

    /// Admin search over name and email, paginated.
    pub async fn search(
        pool: &PgPool,
        term: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers \
             WHERE ($1::TEXT IS NULL \
                    OR email ILIKE '%' || $1 || '%' \
                    OR first_name ILIKE '%' || $1 || '%' \
                    OR last_name ILIKE '%' || $1 || '%') \
             ORDER BY id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(term)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count rows matching the same predicate as [`CustomerRepo::search`].
    pub async fn search_count(pool: &PgPool, term: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM customers \
             WHERE ($1::TEXT IS NULL \
                    OR email ILIKE '%' || $1 || '%' \
                    OR first_name ILIKE '%' || $1 || '%' \
                    OR last_name ILIKE '%' || $1 || '%')",
        )
        .bind(term)
        .fetch_one(pool)
        .await
    }
}
