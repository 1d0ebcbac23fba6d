//! Repository for the `cards` and `card_controls` tables.

use sqlx::PgPool;

use cardvault_core::types::DbId;

use crate::models::card::{Card, CardControls, CreateCard, UpdateCardControls};

/// Column list for `cards` queries.
const COLUMNS: &str = "\
    id, customer_id, card_number, card_type, status, \
    expiry_month, expiry_year, created_at, updated_at";

/// Column list for `card_controls` queries.
const CONTROL_COLUMNS: &str = "\
    card_id, daily_limit_cents, contactless_enabled, online_enabled, \
    international_enabled, atm_enabled, updated_at";

/// Provides CRUD operations for cards and their control toggles.
pub struct CardRepo;

impl CardRepo {
    /// Issue a new card (seed path).
    pub async fn create(pool: &PgPool, dto: &CreateCard) -> Result<Card, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards \
                (customer_id, card_number, card_type, status, expiry_month, expiry_year) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(dto.customer_id)
            .bind(&dto.card_number)
            .bind(&dto.card_type)
            .bind(dto.status.as_str())
            .bind(dto.expiry_month)
            .bind(dto.expiry_year)
            .fetch_one(pool)
            .await
    }

    /// Find a card owned by the given customer.
    ///
    /// The ownership predicate is folded into the row predicate so an absent
    /// card and someone else's card are indistinguishable.
    pub async fn find_for_customer(
        pool: &PgPool,
        card_id: DbId,
        customer_id: DbId,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1 AND customer_id = $2");
        sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a card by primary key (admin path, no ownership predicate).
    pub async fn find_by_id(pool: &PgPool, card_id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .fetch_optional(pool)
            .await
    }

    /// List all cards belonging to a customer.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE customer_id = $1 ORDER BY id");
        sqlx::query_as::<_, Card>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Compare-and-set the card status.
    ///
    /// The update only applies while the row still carries `expected`; returns
    /// `None` if the status moved underneath the caller.
    pub async fn update_status(
        pool: &PgPool,
        card_id: DbId,
        expected: &str,
        new_status: &str,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .bind(expected)
            .bind(new_status)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the controls row for a card, if one exists.
    pub async fn get_controls(
        pool: &PgPool,
        card_id: DbId,
    ) -> Result<Option<CardControls>, sqlx::Error> {
        let query = format!("SELECT {CONTROL_COLUMNS} FROM card_controls WHERE card_id = $1");
        sqlx::query_as::<_, CardControls>(&query)
            .bind(card_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the controls row for a card.
    ///
    /// Absent DTO fields keep the stored value (or the column default on
    /// first insert).
    pub async fn upsert_controls(
        pool: &PgPool,
        card_id: DbId,
        dto: &UpdateCardControls,
    ) -> Result<CardControls, sqlx::Error> {
        let query = format!(
            "INSERT INTO card_controls \
                (card_id, daily_limit_cents, contactless_enabled, online_enabled, \
                 international_enabled, atm_enabled) \
             VALUES ($1, $2, COALESCE($3, TRUE), COALESCE($4, TRUE), \
                     COALESCE($5, FALSE), COALESCE($6, TRUE)) \
             ON CONFLICT (card_id) DO UPDATE SET \
                daily_limit_cents = COALESCE($2, card_controls.daily_limit_cents), \
                contactless_enabled = COALESCE($3, card_controls.contactless_enabled), \
                online_enabled = COALESCE($4, card_controls.online_enabled), \
                international_enabled = COALESCE($5, card_controls.international_enabled), \
                atm_enabled = COALESCE($6, card_controls.atm_enabled), \
                updated_at = NOW() \
             RETURNING {CONTROL_COLUMNS}"
        );
        sqlx::query_as::<_, CardControls>(&query)
            .bind(card_id)
            .bind(dto.daily_limit_cents)
            .bind(dto.contactless_enabled)
            .bind(dto.online_enabled)
            .bind(dto.international_enabled)
            .bind(dto.atm_enabled)
            .fetch_one(pool)
            .await
    }
}
