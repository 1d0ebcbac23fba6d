//! Alert entity, preference row, and DTOs.

use cardvault_core::alert::AlertStatus;
use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Alert type strings stored in `alerts.alert_type`.
pub mod alert_types {
    pub const FRAUD: &str = "FRAUD";
    pub const CONTROL_CHANGE: &str = "CONTROL_CHANGE";
    pub const CARD_STATUS: &str = "CARD_STATUS";
}

/// An alert row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub customer_id: DbId,
    pub card_id: DbId,
    pub transaction_id: Option<DbId>,
    pub alert_type: String,
    pub severity: String,
    pub status: String,
    pub message: String,
    pub action_required: bool,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Alert {
    /// The typed status, or `None` if the stored string is unknown.
    pub fn status(&self) -> Option<AlertStatus> {
        AlertStatus::parse(&self.status)
    }
}

/// DTO for inserting an alert.
#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub customer_id: DbId,
    pub card_id: DbId,
    pub transaction_id: Option<DbId>,
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    pub action_required: bool,
}

/// Filter parameters for the admin alert queue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilter {
    pub customer_id: Option<DbId>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub action_required: Option<bool>,
}

/// A per-customer alert delivery preference row (1:1 with customers).
/// An absent row means defaults.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertPreferences {
    pub customer_id: DbId,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub transaction_alerts: bool,
    pub fraud_alerts: bool,
    pub dispute_updates: bool,
    pub updated_at: Timestamp,
}

impl AlertPreferences {
    /// The defaults applied when no row exists for a customer.
    pub fn defaults(customer_id: DbId, now: Timestamp) -> Self {
        AlertPreferences {
            customer_id,
            email_enabled: true,
            sms_enabled: false,
            push_enabled: true,
            transaction_alerts: true,
            fraud_alerts: true,
            dispute_updates: true,
            updated_at: now,
        }
    }
}

/// DTO for preference updates. Absent fields keep their current value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAlertPreferences {
    pub email_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub push_enabled: Option<bool>,
    pub transaction_alerts: Option<bool>,
    pub fraud_alerts: Option<bool>,
    pub dispute_updates: Option<bool>,
}
