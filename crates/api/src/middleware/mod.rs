//! Request guards: authentication extractors and the permission check.

pub mod auth;
