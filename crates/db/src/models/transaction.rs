//! Transaction entity and query types.

use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Transaction status stored in `transactions.status`.
pub const TRANSACTION_APPROVED: &str = "APPROVED";

/// A transaction row. Amount, merchant, and dates are immutable facts;
/// `is_disputed`, `fraud_flag` are the only mutable columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub card_id: DbId,
    pub customer_id: DbId,
    pub amount_cents: i64,
    pub currency: String,
    pub merchant_name: String,
    pub merchant_category: Option<String>,
    pub status: String,
    pub is_disputed: bool,
    pub fraud_flag: bool,
    pub transaction_date: Timestamp,
    pub created_at: Timestamp,
}

impl Transaction {
    /// Whether the transaction settled as APPROVED.
    pub fn is_approved(&self) -> bool {
        self.status == TRANSACTION_APPROVED
    }
}

/// DTO for recording a transaction (authorization-flow / seed path).
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    pub card_id: DbId,
    pub customer_id: DbId,
    pub amount_cents: i64,
    pub currency: String,
    pub merchant_name: String,
    pub merchant_category: Option<String>,
    pub status: String,
    pub transaction_date: Timestamp,
}

/// Filter parameters for transaction listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilter {
    pub card_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    pub status: Option<String>,
    pub fraud_flag: Option<bool>,
    pub is_disputed: Option<bool>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
