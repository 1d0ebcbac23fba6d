//! Polymorphic admin note entity and DTOs.

use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An admin note row. `note_type` + `reference_id` attach the note to any
/// entity (card, dispute, alert, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminNote {
    pub id: DbId,
    pub admin_id: DbId,
    pub note_type: String,
    pub reference_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdminNote {
    pub note_type: String,
    pub reference_id: DbId,
    pub content: String,
}
