//! Repository for the `alert_preferences` table.

use sqlx::PgPool;

use cardvault_core::types::DbId;

use crate::models::alert::{AlertPreferences, UpdateAlertPreferences};

/// Column list for `alert_preferences` queries.
const COLUMNS: &str = "\
    customer_id, email_enabled, sms_enabled, push_enabled, \
    transaction_alerts, fraud_alerts, dispute_updates, updated_at";

/// Provides get/upsert operations for per-customer alert preferences.
pub struct AlertPreferenceRepo;

impl AlertPreferenceRepo {
    /// Fetch the preference row for a customer, if one exists.
    ///
    /// Callers fall back to [`AlertPreferences::defaults`] on `None`.
    pub async fn find(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Option<AlertPreferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alert_preferences WHERE customer_id = $1");
        sqlx::query_as::<_, AlertPreferences>(&query)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the preference row.
    ///
    /// Absent DTO fields keep the stored value (or the column default on
    /// first insert).
    pub async fn upsert(
        pool: &PgPool,
        customer_id: DbId,
        dto: &UpdateAlertPreferences,
    ) -> Result<AlertPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO alert_preferences \
                (customer_id, email_enabled, sms_enabled, push_enabled, \
                 transaction_alerts, fraud_alerts, dispute_updates) \
             VALUES ($1, COALESCE($2, TRUE), COALESCE($3, FALSE), COALESCE($4, TRUE), \
                     COALESCE($5, TRUE), COALESCE($6, TRUE), COALESCE($7, TRUE)) \
             ON CONFLICT (customer_id) DO UPDATE SET \
                email_enabled = COALESCE($2, alert_preferences.email_enabled), \
                sms_enabled = COALESCE($3, alert_preferences.sms_enabled), \
                push_enabled = COALESCE($4, alert_preferences.push_enabled), \
                transaction_alerts = COALESCE($5, alert_preferences.transaction_alerts), \
                fraud_alerts = COALESCE($6, alert_preferences.fraud_alerts), \
                dispute_updates = COALESCE($7, alert_preferences.dispute_updates), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AlertPreferences>(&query)
            .bind(customer_id)
            .bind(dto.email_enabled)
            .bind(dto.sms_enabled)
            .bind(dto.push_enabled)
            .bind(dto.transaction_alerts)
            .bind(dto.fraud_alerts)
            .bind(dto.dispute_updates)
            .fetch_one(pool)
            .await
    }
}
