//! Audit trail vocabulary.
//!
//! Action and target type constants shared by the recorder, the repository
//! layer, and the admin browse endpoint. Audit rows are append-only.

/// Known action types for audit log entries.
pub mod action_types {
    pub const LOGIN: &str = "login";
    pub const CARD_LOCK: &str = "card_lock";
    pub const CARD_UNLOCK: &str = "card_unlock";
    pub const DISPUTE_UPDATE: &str = "dispute_update";
    pub const ALERT_REVIEW: &str = "alert_review";
    pub const ALERT_DISMISS: &str = "alert_dismiss";
    pub const NOTE_CREATE: &str = "note_create";
    pub const NOTE_UPDATE: &str = "note_update";
    pub const NOTE_DELETE: &str = "note_delete";
}

/// Known target entity types for audit log entries.
pub mod target_types {
    pub const CUSTOMER: &str = "customer";
    pub const CARD: &str = "card";
    pub const TRANSACTION: &str = "transaction";
    pub const DISPUTE: &str = "dispute";
    pub const ALERT: &str = "alert";
    pub const ADMIN_NOTE: &str = "admin_note";
    pub const ADMIN_USER: &str = "admin_user";
}
