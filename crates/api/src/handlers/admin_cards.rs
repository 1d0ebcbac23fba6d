//! Handlers for admin card actions (lock / unlock by card id).
//!
//! Unlike the customer routes there is no ownership predicate; access is
//! gated by the permission table instead, and every mutation is
//! audit-recorded.

use axum::extract::{Path, State};
use axum::Json;

use cardvault_core::audit::{action_types, target_types};
use cardvault_core::card::{lock_transition, unlock_transition};
use cardvault_core::error::CoreError;
use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::card::{Card, CardResponse};
use cardvault_db::repositories::CardRepo;

use crate::audit::{self, AuditEntry, ClientInfo};
use crate::error::{AppError, AppResult};
use crate::handlers::cards::apply_status_transition;
use crate::middleware::auth::AdminAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Resolve a card by id alone (admin path).
async fn find_card(state: &AppState, card_id: DbId) -> AppResult<Card> {
    CardRepo::find_by_id(&state.pool, card_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        }))
}

/// POST /api/v1/admin/cards/{card_id}/lock
///
/// Lock any customer's card. Requires LOCK_CARDS.
pub async fn lock_card(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CardResponse>>> {
    admin.require(Permission::LockCards)?;

    let card = find_card(&state, card_id).await?;
    let updated = apply_status_transition(&state, &card, lock_transition).await?;

    state
        .corebank
        .notify_card_status(updated.id, &updated.status)
        .await;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type: action_types::CARD_LOCK,
            target_type: target_types::CARD,
            target_id: updated.id,
            description: format!("Locked card {} for customer {}", updated.id, updated.customer_id),
            client: &client,
        },
    );

    Ok(Json(ApiResponse::new(CardResponse::from(&updated))))
}

/// POST /api/v1/admin/cards/{card_id}/unlock
///
/// Unlock any customer's card. Requires UNLOCK_CARDS.
pub async fn unlock_card(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CardResponse>>> {
    admin.require(Permission::UnlockCards)?;

    let card = find_card(&state, card_id).await?;
    let updated = apply_status_transition(&state, &card, unlock_transition).await?;

    state
        .corebank
        .notify_card_status(updated.id, &updated.status)
        .await;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type: action_types::CARD_UNLOCK,
            target_type: target_types::CARD,
            target_id: updated.id,
            description: format!(
                "Unlocked card {} for customer {}",
                updated.id, updated.customer_id
            ),
            client: &client,
        },
    );

    Ok(Json(ApiResponse::new(CardResponse::from(&updated))))
}
