//! Repository for the `disputes` and `dispute_timeline` tables.
//!
//! Filing and resolution both touch more than one row, so they run inside a
//! single database transaction: the dispute insert, the `is_disputed` flip on
//! the transaction, and the timeline append either all land or none do.

use sqlx::PgPool;

use cardvault_core::dispute::DisputeStatus;
use cardvault_core::types::DbId;

use crate::models::dispute::{actor_types, CreateDispute, Dispute, DisputeTimelineEntry};

/// Column list for `disputes` queries.
const COLUMNS: &str = "\
    id, transaction_id, customer_id, reason, description, status, \
    opened_at, resolved_at, resolved_by, resolution_note, created_at, \
    updated_at";

/// Column list for `dispute_timeline` queries.
const TIMELINE_COLUMNS: &str = "\
    id, dispute_id, status, note, actor_type, actor_id, created_at";

/// Provides filing, lookup, and resolution operations for disputes.
pub struct DisputeRepo;

impl DisputeRepo {
    /// File a dispute atomically.
    ///
    /// Inserts the dispute row, marks the transaction disputed, and appends
    /// the initial SUBMITTED timeline entry in one transaction. The unique
    /// constraint on `transaction_id` backstops the eligibility check under
    /// concurrent filing.
    pub async fn file(pool: &PgPool, dto: &CreateDispute) -> Result<Dispute, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO disputes (transaction_id, customer_id, reason, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let dispute = sqlx::query_as::<_, Dispute>(&insert)
            .bind(dto.transaction_id)
            .bind(dto.customer_id)
            .bind(&dto.reason)
            .bind(&dto.description)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE transactions SET is_disputed = TRUE WHERE id = $1")
            .bind(dto.transaction_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO dispute_timeline (dispute_id, status, note, actor_type, actor_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(dispute.id)
        .bind(DisputeStatus::Submitted.as_str())
        .bind("Dispute filed by customer")
        .bind(actor_types::CUSTOMER)
        .bind(dto.customer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(dispute)
    }

    /// Find a dispute owned by the given customer.
    pub async fn find_for_customer(
        pool: &PgPool,
        dispute_id: DbId,
        customer_id: DbId,
    ) -> Result<Option<Dispute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disputes WHERE id = $1 AND customer_id = $2");
        sqlx::query_as::<_, Dispute>(&query)
            .bind(dispute_id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a dispute by primary key (admin path).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dispute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disputes WHERE id = $1");
        sqlx::query_as::<_, Dispute>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a dispute already references this transaction.
    pub async fn exists_for_transaction(
        pool: &PgPool,
        transaction_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM disputes WHERE transaction_id = $1")
                .bind(transaction_id)
                .fetch_one(pool)
                .await?;
        Ok(count > 0)
    }

    /// List a customer's disputes, newest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Dispute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM disputes WHERE customer_id = $1 \
             ORDER BY opened_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a customer's disputes.
    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM disputes WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    /// Admin list, optionally filtered by status, oldest open first.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Dispute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM disputes \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY opened_at ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count disputes matching the admin list filter.
    pub async fn count_all(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM disputes WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Apply an admin status update atomically.
    ///
    /// Terminal transitions stamp the resolution fields; every change appends
    /// a timeline entry in the same transaction.
    pub async fn update_status(
        pool: &PgPool,
        dispute_id: DbId,
        new_status: DisputeStatus,
        resolution_note: Option<&str>,
        admin_id: DbId,
    ) -> Result<Option<Dispute>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let dispute = if new_status.is_terminal() {
            let update = format!(
                "UPDATE disputes SET status = $2, resolved_at = NOW(), resolved_by = $3, \
                        resolution_note = COALESCE($4, resolution_note), updated_at = NOW() \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Dispute>(&update)
                .bind(dispute_id)
                .bind(new_status.as_str())
                .bind(admin_id)
                .bind(resolution_note)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            let update = format!(
                "UPDATE disputes SET status = $2, \
                        resolution_note = COALESCE($3, resolution_note), updated_at = NOW() \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Dispute>(&update)
                .bind(dispute_id)
                .bind(new_status.as_str())
                .bind(resolution_note)
                .fetch_optional(&mut *tx)
                .await?
        };

        let Some(dispute) = dispute else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO dispute_timeline (dispute_id, status, note, actor_type, actor_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(dispute.id)
        .bind(new_status.as_str())
        .bind(resolution_note)
        .bind(actor_types::ADMIN)
        .bind(admin_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(dispute))
    }

    /// Fetch the timeline for a dispute, oldest first.
    pub async fn timeline(
        pool: &PgPool,
        dispute_id: DbId,
    ) -> Result<Vec<DisputeTimelineEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {TIMELINE_COLUMNS} FROM dispute_timeline \
             WHERE dispute_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, DisputeTimelineEntry>(&query)
            .bind(dispute_id)
            .fetch_all(pool)
            .await
    }
}
