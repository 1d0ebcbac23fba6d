//! Customer entity and DTOs.

use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer row. `password_hash` never leaves the persistence layer;
/// responses use [`CustomerResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe projection of a customer for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Customer> for CustomerResponse {
    fn from(c: &Customer) -> Self {
        CustomerResponse {
            id: c.id,
            email: c.email.clone(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            phone: c.phone.clone(),
            is_active: c.is_active,
            last_login_at: c.last_login_at,
            created_at: c.created_at,
        }
    }
}

/// DTO for creating a customer (signup / seed path).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// DTO for customer profile updates. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}
