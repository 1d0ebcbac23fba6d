//! Domain logic for the card management platform.
//!
//! This crate holds everything with zero I/O: shared id/timestamp types, the
//! closed error taxonomy, the role/permission table, the card and dispute and
//! alert status machines, and the audit action vocabulary. Both the
//! persistence layer and the API server depend on it; it depends on nothing
//! internal.

pub mod alert;
pub mod audit;
pub mod card;
pub mod dispute;
pub mod error;
pub mod roles;
pub mod types;
