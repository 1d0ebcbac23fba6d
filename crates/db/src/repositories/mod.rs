//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_note_repo;
pub mod admin_user_repo;
pub mod alert_preference_repo;
pub mod alert_repo;
pub mod audit_log_repo;
pub mod card_repo;
pub mod customer_repo;
pub mod dispute_repo;
pub mod transaction_repo;

pub use admin_note_repo::AdminNoteRepo;
pub use admin_user_repo::AdminUserRepo;
pub use alert_preference_repo::AlertPreferenceRepo;
pub use alert_repo::AlertRepo;
pub use audit_log_repo::AuditLogRepo;
pub use card_repo::CardRepo;
pub use customer_repo::CustomerRepo;
pub use dispute_repo::DisputeRepo;
pub use transaction_repo::TransactionRepo;
