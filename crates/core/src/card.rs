//! Card status machine and PAN presentation helpers.
//!
//! Status strings must match the values stored in `cards.status`. Only
//! ACTIVE cards may be locked; only LOCKED cards may be unlocked; CLOSED is
//! terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle states of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Locked,
    Pending,
    Closed,
    Expired,
}

impl CardStatus {
    /// The canonical string stored in `cards.status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Active => "ACTIVE",
            CardStatus::Locked => "LOCKED",
            CardStatus::Pending => "PENDING",
            CardStatus::Closed => "CLOSED",
            CardStatus::Expired => "EXPIRED",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(CardStatus::Active),
            "LOCKED" => Some(CardStatus::Locked),
            "PENDING" => Some(CardStatus::Pending),
            "CLOSED" => Some(CardStatus::Closed),
            "EXPIRED" => Some(CardStatus::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a lock request against the current status.
///
/// Returns the new status (LOCKED) or the specific conflict for each
/// ineligible state.
pub fn lock_transition(current: CardStatus) -> Result<CardStatus, CoreError> {
    match current {
        CardStatus::Active => Ok(CardStatus::Locked),
        CardStatus::Locked => Err(CoreError::Conflict {
            code: "CARD_ALREADY_LOCKED",
            message: "Card is already locked".into(),
        }),
        CardStatus::Closed => Err(CoreError::Conflict {
            code: "CARD_ALREADY_CLOSED",
            message: "Card is closed and cannot be locked".into(),
        }),
        CardStatus::Pending | CardStatus::Expired => Err(CoreError::BusinessRule {
            code: "INVALID_STATUS",
            message: format!("Card cannot be locked while {current}"),
        }),
    }
}

/// Validate an unlock request against the current status.
///
/// Only LOCKED cards may be unlocked.
pub fn unlock_transition(current: CardStatus) -> Result<CardStatus, CoreError> {
    match current {
        CardStatus::Locked => Ok(CardStatus::Active),
        _ => Err(CoreError::Conflict {
            code: "CARD_NOT_LOCKED",
            message: "Card is not locked".into(),
        }),
    }
}

/// Render a stored PAN as `**** **** **** 1234`.
///
/// Responses never carry the full PAN. Inputs shorter than four digits are
/// masked entirely.
pub fn mask_pan(pan: &str) -> String {
    let digits: String = pan.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "****".to_string();
    }
    format!("**** **** **** {}", &digits[digits.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_round_trip() {
        for status in [
            CardStatus::Active,
            CardStatus::Locked,
            CardStatus::Pending,
            CardStatus::Closed,
            CardStatus::Expired,
        ] {
            assert_eq!(CardStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CardStatus::parse("FROZEN"), None);
    }

    #[test]
    fn lock_only_from_active() {
        assert_eq!(lock_transition(CardStatus::Active).unwrap(), CardStatus::Locked);
    }

    #[test]
    fn lock_already_locked_conflicts() {
        let err = lock_transition(CardStatus::Locked).unwrap_err();
        assert_eq!(err.code(), "CARD_ALREADY_LOCKED");
    }

    #[test]
    fn lock_closed_conflicts() {
        let err = lock_transition(CardStatus::Closed).unwrap_err();
        assert_eq!(err.code(), "CARD_ALREADY_CLOSED");
    }

    #[test]
    fn lock_pending_or_expired_rejected() {
        assert_eq!(lock_transition(CardStatus::Pending).unwrap_err().code(), "INVALID_STATUS");
        assert_eq!(lock_transition(CardStatus::Expired).unwrap_err().code(), "INVALID_STATUS");
    }

    #[test]
    fn unlock_only_from_locked() {
        assert_eq!(unlock_transition(CardStatus::Locked).unwrap(), CardStatus::Active);
        for status in [
            CardStatus::Active,
            CardStatus::Pending,
            CardStatus::Closed,
            CardStatus::Expired,
        ] {
            assert_eq!(unlock_transition(status).unwrap_err().code(), "CARD_NOT_LOCKED");
        }
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_pan("4532015112830366"), "**** **** **** 0366");
        assert_eq!(mask_pan("4532-0151-1283-0366"), "**** **** **** 0366");
    }

    #[test]
    fn mask_short_input() {
        assert_eq!(mask_pan("12"), "****");
    }
}
