//! Alert severity and lifecycle rules.
//!
//! Alerts are raised by fraud detection and card-control changes. Customers
//! may mark their own alerts read; admins move them to REVIEWED or RESOLVED.
//! RESOLVED is terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    /// The canonical string stored in `alerts.severity`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "LOW",
            AlertSeverity::Medium => "MEDIUM",
            AlertSeverity::High => "HIGH",
            AlertSeverity::Critical => "CRITICAL",
        }
    }

    /// Parse a stored severity string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(AlertSeverity::Low),
            "MEDIUM" => Some(AlertSeverity::Medium),
            "HIGH" => Some(AlertSeverity::High),
            "CRITICAL" => Some(AlertSeverity::Critical),
            _ => None,
        }
    }
}

/// Lifecycle states of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    New,
    Read,
    Reviewed,
    Resolved,
}

impl AlertStatus {
    /// The canonical string stored in `alerts.status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::New => "NEW",
            AlertStatus::Read => "READ",
            AlertStatus::Reviewed => "REVIEWED",
            AlertStatus::Resolved => "RESOLVED",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(AlertStatus::New),
            "READ" => Some(AlertStatus::Read),
            "REVIEWED" => Some(AlertStatus::Reviewed),
            "RESOLVED" => Some(AlertStatus::Resolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a customer marking an alert read.
///
/// NEW moves to READ; READ stays READ (idempotent). Alerts an admin has
/// already handled cannot go back.
pub fn read_transition(current: AlertStatus) -> Result<AlertStatus, CoreError> {
    match current {
        AlertStatus::New | AlertStatus::Read => Ok(AlertStatus::Read),
        AlertStatus::Reviewed | AlertStatus::Resolved => Err(CoreError::BusinessRule {
            code: "ALERT_ALREADY_HANDLED",
            message: format!("Alert has already been {current}"),
        }),
    }
}

/// Validate an admin review or dismissal.
///
/// Both land the same check: an already-RESOLVED alert rejects rather than
/// silently succeeding.
pub fn admin_transition(current: AlertStatus, target: AlertStatus) -> Result<AlertStatus, CoreError> {
    if current == AlertStatus::Resolved {
        return Err(CoreError::BusinessRule {
            code: "ALERT_ALREADY_RESOLVED",
            message: "Alert has already been resolved".into(),
        });
    }
    match target {
        AlertStatus::Reviewed | AlertStatus::Resolved => Ok(target),
        _ => Err(CoreError::Validation(format!(
            "Admins can only move alerts to REVIEWED or RESOLVED, not {target}"
        ))),
    }
}
