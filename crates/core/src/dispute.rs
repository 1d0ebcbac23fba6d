//! Dispute status machine and filing eligibility rules.
//!
//! A transaction can carry at most one dispute. Filing is allowed only for
//! APPROVED transactions within [`DISPUTE_WINDOW_DAYS`] of the transaction
//! date. RESOLVED and DENIED are terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of days after the transaction date during which a dispute may be filed.
pub const DISPUTE_WINDOW_DAYS: i64 = 60;

/// Lifecycle states of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    Submitted,
    UnderReview,
    Resolved,
    Denied,
}

impl DisputeStatus {
    /// The canonical string stored in `disputes.status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::Submitted => "SUBMITTED",
            DisputeStatus::UnderReview => "UNDER_REVIEW",
            DisputeStatus::Resolved => "RESOLVED",
            DisputeStatus::Denied => "DENIED",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUBMITTED" => Some(DisputeStatus::Submitted),
            "UNDER_REVIEW" => Some(DisputeStatus::UnderReview),
            "RESOLVED" => Some(DisputeStatus::Resolved),
            "DENIED" => Some(DisputeStatus::Denied),
            _ => None,
        }
    }

    /// RESOLVED and DENIED accept no further status changes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DisputeStatus::Resolved | DisputeStatus::Denied)
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about a transaction relevant to dispute filing.
#[derive(Debug, Clone, Copy)]
pub struct FilingCandidate {
    /// `transactions.status` -- must be `"APPROVED"`.
    pub transaction_approved: bool,
    /// When the transaction occurred.
    pub transaction_date: Timestamp,
    /// Whether a dispute already references this transaction.
    pub already_disputed: bool,
}

/// Check whether a dispute may be filed against the given transaction.
///
/// The checks run in a fixed order so the surfaced error is deterministic:
/// eligibility, then duplicate, then window.
pub fn check_filing_eligibility(candidate: &FilingCandidate, now: Timestamp) -> Result<(), CoreError> {
    if !candidate.transaction_approved {
        return Err(CoreError::BusinessRule {
            code: "TRANSACTION_NOT_ELIGIBLE",
            message: "Only approved transactions can be disputed".into(),
        });
    }

    if candidate.already_disputed {
        return Err(CoreError::Conflict {
            code: "TRANSACTION_ALREADY_DISPUTED",
            message: "A dispute has already been filed for this transaction".into(),
        });
    }

    let age_days = (now - candidate.transaction_date).num_days();
    if age_days > DISPUTE_WINDOW_DAYS {
        return Err(CoreError::BusinessRule {
            code: "DISPUTE_WINDOW_EXPIRED",
            message: format!(
                "Disputes must be filed within {DISPUTE_WINDOW_DAYS} days of the transaction"
            ),
        });
    }

    Ok(())
}

/// Number of days a dispute has been (or was) open.
///
/// Open disputes measure against `now`; resolved disputes against the
/// resolution timestamp. Never negative.
pub fn days_open(opened_at: Timestamp, resolved_at: Option<Timestamp>, now: Timestamp) -> i64 {
    let end = resolved_at.unwrap_or(now);
    (end - opened_at).num_days().max(0)
}
