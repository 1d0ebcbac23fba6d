//! Fire-and-forget audit recorder.
//!
//! Admin mutations call [`record`] after the mutation has succeeded. The
//! insert runs on a detached task: a failed audit write is logged and
//! dropped, never surfaced to the client and never retried, and the response
//! does not wait for it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cardvault_core::types::DbId;
use cardvault_db::models::audit::CreateAuditLog;
use cardvault_db::repositories::AuditLogRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Client network details captured for audit rows.
///
/// The IP falls back through `x-forwarded-for` (first entry) and
/// `x-real-ip`; both may be absent when the service is called directly.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.trim().to_string())
            });

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        Ok(ClientInfo {
            ip_address,
            user_agent,
        })
    }
}

/// Describe one auditable admin action.
///
/// `action_type` and `target_type` come from the constants in
/// `cardvault_core::audit`.
pub struct AuditEntry<'a> {
    pub admin_id: DbId,
    pub action_type: &'static str,
    pub target_type: &'static str,
    pub target_id: DbId,
    pub description: String,
    pub client: &'a ClientInfo,
}

/// Persist an audit entry without blocking the response.
///
/// Spawns a detached insert; failures are logged at WARN and the entry is
/// dropped.
pub fn record(state: &AppState, entry: AuditEntry<'_>) {
    let pool = state.pool.clone();
    let row = CreateAuditLog {
        admin_id: Some(entry.admin_id),
        action_type: entry.action_type.to_string(),
        target_type: Some(entry.target_type.to_string()),
        target_id: Some(entry.target_id),
        description: Some(entry.description),
        ip_address: entry.client.ip_address.clone(),
        user_agent: entry.client.user_agent.clone(),
    };

    tokio::spawn(async move {
        if let Err(err) = AuditLogRepo::insert(&pool, &row).await {
            tracing::warn!(
                error = %err,
                action_type = %row.action_type,
                "audit write failed; entry dropped"
            );
        }
    });
}
