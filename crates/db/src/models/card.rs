//! Card and card-control entities and DTOs.

use cardvault_core::card::{mask_pan, CardStatus};
use cardvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A card row. `card_number` holds the full PAN and never leaves the
/// persistence layer unmasked; responses use [`CardResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Card {
    pub id: DbId,
    pub customer_id: DbId,
    pub card_number: String,
    pub card_type: String,
    pub status: String,
    pub expiry_month: i16,
    pub expiry_year: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Card {
    /// The typed status, or `None` if the stored string is unknown.
    pub fn status(&self) -> Option<CardStatus> {
        CardStatus::parse(&self.status)
    }
}

/// Card projection with the PAN masked to its last four digits.
#[derive(Debug, Clone, Serialize)]
pub struct CardResponse {
    pub id: DbId,
    pub customer_id: DbId,
    pub card_number: String,
    pub card_type: String,
    pub status: String,
    pub expiry_month: i16,
    pub expiry_year: i16,
    pub created_at: Timestamp,
}

impl From<&Card> for CardResponse {
    fn from(c: &Card) -> Self {
        CardResponse {
            id: c.id,
            customer_id: c.customer_id,
            card_number: mask_pan(&c.card_number),
            card_type: c.card_type.clone(),
            status: c.status.clone(),
            expiry_month: c.expiry_month,
            expiry_year: c.expiry_year,
            created_at: c.created_at,
        }
    }
}

/// DTO for issuing a card (seed path).
#[derive(Debug, Clone)]
pub struct CreateCard {
    pub customer_id: DbId,
    pub card_number: String,
    pub card_type: String,
    pub status: CardStatus,
    pub expiry_month: i16,
    pub expiry_year: i16,
}

/// A card-controls row (1:1 with cards). An absent row means defaults.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CardControls {
    pub card_id: DbId,
    pub daily_limit_cents: Option<i64>,
    pub contactless_enabled: bool,
    pub online_enabled: bool,
    pub international_enabled: bool,
    pub atm_enabled: bool,
    pub updated_at: Timestamp,
}

impl CardControls {
    /// The defaults applied when no row exists for a card.
    pub fn defaults(card_id: DbId, now: Timestamp) -> Self {
        CardControls {
            card_id,
            daily_limit_cents: None,
            contactless_enabled: true,
            online_enabled: true,
            international_enabled: false,
            atm_enabled: true,
            updated_at: now,
        }
    }
}

/// DTO for card-control updates. Absent fields keep their current value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCardControls {
    pub daily_limit_cents: Option<i64>,
    pub contactless_enabled: Option<bool>,
    pub online_enabled: Option<bool>,
    pub international_enabled: Option<bool>,
    pub atm_enabled: Option<bool>,
}
