use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cardvault_core::error::CoreError;
use cardvault_core::roles::{AdminRole, Permission};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard
/// `{ "success": false, "error": { "code", "message" } }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cardvault_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The acting admin's role lacks the permission a route requires.
    #[error("Missing required permission: {required}")]
    PermissionDenied {
        required: Permission,
        role: AdminRole,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Permission denials carry an extra details payload naming the
        // missing permission and the acting role.
        if let AppError::PermissionDenied { required, role } = &self {
            let body = json!({
                "success": false,
                "error": {
                    "code": "PERMISSION_DENIED",
                    "message": format!("Missing required permission: {required}"),
                    "details": {
                        "required_permission": required.as_str(),
                        "admin_role": role.as_str(),
                    },
                },
            });
            return (StatusCode::FORBIDDEN, axum::Json(body)).into_response();
        }

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::BusinessRule { code, message } => {
                    (StatusCode::BAD_REQUEST, *code, message.clone())
                }
                CoreError::Conflict { code, message } => {
                    (StatusCode::CONFLICT, *code, message.clone())
                }
                CoreError::Unauthorized { code, message } => {
                    (StatusCode::UNAUTHORIZED, *code, message.clone())
                }
                CoreError::Forbidden { code, message } => {
                    (StatusCode::FORBIDDEN, *code, message.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Handled above ---
            AppError::PermissionDenied { .. } => unreachable!(),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "error": {
                "code": code,
                "message": message,
            },
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - The dispute uniqueness constraint maps to the domain conflict code, so a
///   filing race lost at the database still surfaces as 409.
/// - Other unique violations (constraint name starting with `uq_`) map to a
///   generic 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == "uq_disputes_transaction_id" {
                    return (
                        StatusCode::CONFLICT,
                        "TRANSACTION_ALREADY_DISPUTED",
                        "A dispute has already been filed for this transaction".to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
