//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the entity is client-mutable
//! - Response DTOs where the row cannot be serialized as-is (masked PANs,
//!   derived fields)

pub mod admin_note;
pub mod admin_user;
pub mod alert;
pub mod audit;
pub mod card;
pub mod customer;
pub mod dispute;
pub mod transaction;
