//! Repository for the `alerts` table.

use sqlx::PgPool;

use cardvault_core::alert::AlertStatus;
use cardvault_core::types::DbId;

use crate::models::alert::{Alert, AlertFilter, CreateAlert};

/// Column list for `alerts` queries.
const COLUMNS: &str = "\
    id, customer_id, card_id, transaction_id, alert_type, severity, status, \
    message, action_required, reviewed_by, reviewed_at, created_at";

/// Provides CRUD operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new alert.
    pub async fn create(pool: &PgPool, dto: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts \
                (customer_id, card_id, transaction_id, alert_type, severity, message, \
                 action_required) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(dto.customer_id)
            .bind(dto.card_id)
            .bind(dto.transaction_id)
            .bind(&dto.alert_type)
            .bind(&dto.severity)
            .bind(&dto.message)
            .bind(dto.action_required)
            .fetch_one(pool)
            .await
    }

    /// Find an alert owned by the given customer.
    pub async fn find_for_customer(
        pool: &PgPool,
        alert_id: DbId,
        customer_id: DbId,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1 AND customer_id = $2");
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an alert by primary key (admin path).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a customer's alerts, newest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts WHERE customer_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a customer's alerts.
    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM alerts WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    /// Admin queue listing with optional filters, newest first.
    pub async fn list_all(
        pool: &PgPool,
        filter: &AlertFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE ($1::BIGINT IS NULL OR customer_id = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
               AND ($3::TEXT IS NULL OR severity = $3) \
               AND ($4::BOOLEAN IS NULL OR action_required = $4) \
             ORDER BY created_at DESC \
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(filter.customer_id)
            .bind(&filter.status)
            .bind(&filter.severity)
            .bind(filter.action_required)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count alerts matching the admin queue filter.
    pub async fn count_all(pool: &PgPool, filter: &AlertFilter) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM alerts \
             WHERE ($1::BIGINT IS NULL OR customer_id = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
               AND ($3::TEXT IS NULL OR severity = $3) \
               AND ($4::BOOLEAN IS NULL OR action_required = $4)",
        )
        .bind(filter.customer_id)
        .bind(&filter.status)
        .bind(&filter.severity)
        .bind(filter.action_required)
        .fetch_one(pool)
        .await
    }

    /// Record that the owning customer has seen the alert.
    pub async fn set_status(
        pool: &PgPool,
        alert_id: DbId,
        status: AlertStatus,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Apply an admin review or dismissal: set the target status, stamp the
    /// reviewer, and clear `action_required`.
    pub async fn apply_admin_action(
        pool: &PgPool,
        alert_id: DbId,
        status: AlertStatus,
        admin_id: DbId,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET status = $2, reviewed_by = $3, reviewed_at = NOW(), \
                    action_required = FALSE \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(status.as_str())
            .bind(admin_id)
            .fetch_optional(pool)
            .await
    }
}
