//! Dispute entities, timeline rows, and DTOs.

use cardvault_core::dispute::{days_open, DisputeStatus};
use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dispute row. One per transaction, enforced by
/// `uq_disputes_transaction_id`.
#[derive(Debug, Clone, FromRow)]
pub struct Dispute {
    pub id: DbId,
    pub transaction_id: DbId,
    pub customer_id: DbId,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub opened_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub resolution_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dispute {
    /// The typed status, or `None` if the stored string is unknown.
    pub fn status(&self) -> Option<DisputeStatus> {
        DisputeStatus::parse(&self.status)
    }

    /// Build the response projection, deriving `days_open` against `now`.
    pub fn to_response(&self, now: Timestamp) -> DisputeResponse {
        DisputeResponse {
            id: self.id,
            transaction_id: self.transaction_id,
            customer_id: self.customer_id,
            reason: self.reason.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            opened_at: self.opened_at,
            resolved_at: self.resolved_at,
            resolved_by: self.resolved_by,
            resolution_note: self.resolution_note.clone(),
            days_open: days_open(self.opened_at, self.resolved_at, now),
        }
    }
}

/// Dispute projection with the derived `days_open` field.
#[derive(Debug, Clone, Serialize)]
pub struct DisputeResponse {
    pub id: DbId,
    pub transaction_id: DbId,
    pub customer_id: DbId,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub opened_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub resolution_note: Option<String>,
    pub days_open: i64,
}

/// DTO for filing a dispute.
#[derive(Debug, Clone)]
pub struct CreateDispute {
    pub transaction_id: DbId,
    pub customer_id: DbId,
    pub reason: String,
    pub description: Option<String>,
}

/// DTO for an admin dispute status update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDisputeStatus {
    pub status: String,
    pub resolution_note: Option<String>,
}

/// An append-only dispute timeline row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DisputeTimelineEntry {
    pub id: DbId,
    pub dispute_id: DbId,
    pub status: String,
    pub note: Option<String>,
    pub actor_type: String,
    pub actor_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Actor type strings for timeline rows.
pub mod actor_types {
    pub const CUSTOMER: &str = "customer";
    pub const ADMIN: &str = "admin";
    pub const SYSTEM: &str = "system";
}
