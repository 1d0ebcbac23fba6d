//! Audit log entity and query types.
//!
//! Audit rows are append-only and have no `updated_at`.

use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub admin_id: Option<DbId>,
    pub action_type: String,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub description: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub admin_id: Option<DbId>,
    pub action_type: String,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub description: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Filter parameters for the admin audit browse endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub admin_id: Option<DbId>,
    pub action_type: Option<String>,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
