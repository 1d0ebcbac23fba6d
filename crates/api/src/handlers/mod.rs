//! HTTP handlers, one module per resource.
//!
//! Customer-facing modules authenticate with [`crate::middleware::auth::CustomerAuth`];
//! `admin_*` modules authenticate with [`crate::middleware::auth::AdminAuth`]
//! and run the permission guard before touching storage.

pub mod admin_alerts;
pub mod admin_audit;
pub mod admin_auth;
pub mod admin_cards;
pub mod admin_customers;
pub mod admin_disputes;
pub mod admin_notes;
pub mod admin_transactions;
pub mod alerts;
pub mod auth;
pub mod cards;
pub mod disputes;
pub mod fraud;
pub mod transactions;
