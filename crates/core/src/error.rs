//! Domain-level error taxonomy.
//!
//! Every business failure surfaces as one [`CoreError`] variant carrying a
//! stable machine-readable code. The API layer performs the single exhaustive
//! match that maps each variant to an HTTP status; nothing anywhere dispatches
//! on error message strings.

use crate::types::DbId;

/// Closed set of domain errors.
///
/// `NotFound` is deliberately used both when a row is absent and when it
/// exists but belongs to a different principal, so the two cases are
/// indistinguishable on the wire.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// Entity absent, or present but not owned by the caller.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// A business rule rejected the request (HTTP 400 with a named code).
    #[error("{message}")]
    BusinessRule {
        code: &'static str,
        message: String,
    },

    /// The entity is in a state that conflicts with the request (HTTP 409).
    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: String,
    },

    /// Authentication failure (HTTP 401 with a named code).
    #[error("{message}")]
    Unauthorized {
        code: &'static str,
        message: String,
    },

    /// Authenticated but not allowed (HTTP 403 with a named code).
    #[error("{message}")]
    Forbidden {
        code: &'static str,
        message: String,
    },

    /// Unexpected internal failure. The message is logged, never sent.
    #[error("{0}")]
    Internal(String),
}

/// Error codes for the 401 family.
pub mod auth_codes {
    pub const TOKEN_REQUIRED: &str = "TOKEN_REQUIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
}

/// Error codes for the 403 family (permission denials carry their own
/// payload in the API layer).
pub mod forbidden_codes {
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const ACCOUNT_DISABLED: &str = "ACCOUNT_DISABLED";
}

impl CoreError {
    /// Shorthand for an `Unauthorized` with a code from [`auth_codes`].
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        CoreError::Unauthorized {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a `Forbidden` with a code from [`forbidden_codes`].
    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        CoreError::Forbidden {
            code,
            message: message.into(),
        }
    }

    /// A deactivated-principal rejection.
    pub fn account_disabled() -> Self {
        CoreError::forbidden(forbidden_codes::ACCOUNT_DISABLED, "Account is deactivated")
    }

    /// The stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::BusinessRule { code, .. } => code,
            CoreError::Conflict { code, .. } => code,
            CoreError::Unauthorized { code, .. } => code,
            CoreError::Forbidden { code, .. } => code,
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
