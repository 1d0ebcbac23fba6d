//! Handlers for the customer `/cards` resource.
//!
//! Every lookup folds the ownership predicate into the query, so a card that
//! exists but belongs to someone else surfaces as 404.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use cardvault_core::alert::AlertSeverity;
use cardvault_core::card::{lock_transition, unlock_transition, CardStatus};
use cardvault_core::error::CoreError;
use cardvault_core::types::DbId;
use cardvault_db::models::alert::{alert_types, CreateAlert};
use cardvault_db::models::card::{Card, CardControls, CardResponse, UpdateCardControls};
use cardvault_db::models::transaction::{Transaction, TransactionFilter};
use cardvault_db::repositories::{AlertRepo, CardRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CustomerAuth;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Card detail payload: the masked card plus its effective controls.
#[derive(Debug, Serialize)]
pub struct CardDetail {
    pub card: CardResponse,
    pub controls: CardControls,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/cards
///
/// List the authenticated customer's cards.
pub async fn list_cards(
    State(state): State<AppState>,
    auth: CustomerAuth,
) -> AppResult<Json<ApiResponse<Vec<CardResponse>>>> {
    let cards = CardRepo::list_for_customer(&state.pool, auth.customer_id).await?;
    let responses = cards.iter().map(CardResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/v1/cards/{card_id}
///
/// Fetch one card with its controls. A missing controls row resolves to the
/// defaults.
pub async fn get_card(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CardDetail>>> {
    let card = find_owned_card(&state, card_id, auth.customer_id).await?;
    let controls = CardRepo::get_controls(&state.pool, card.id)
        .await?
        .unwrap_or_else(|| CardControls::defaults(card.id, Utc::now()));

    Ok(Json(ApiResponse::new(CardDetail {
        card: CardResponse::from(&card),
        controls,
    })))
}

/// GET /api/v1/cards/{card_id}/transactions
///
/// Paginated transaction listing for one owned card.
pub async fn card_transactions(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(card_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Transaction>>> {
    // Resolve ownership before listing so an unowned card 404s rather than
    // returning an empty page.
    let card = find_owned_card(&state, card_id, auth.customer_id).await?;

    let filter = TransactionFilter {
        card_id: Some(card.id),
        customer_id: Some(auth.customer_id),
        ..TransactionFilter::default()
    };
    let (limit, offset) = params.limit_offset();

    let transactions = TransactionRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = TransactionRepo::count(&state.pool, &filter).await?;

    Ok(Json(Paginated::new(transactions, total, limit, offset)))
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// PUT /api/v1/cards/{card_id}/controls
///
/// Update limit and feature toggles. Raises a low-severity alert so the
/// customer's activity feed records the change.
pub async fn update_controls(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(card_id): Path<DbId>,
    Json(input): Json<UpdateCardControls>,
) -> AppResult<Json<ApiResponse<CardControls>>> {
    if let Some(limit) = input.daily_limit_cents {
        if limit <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "daily_limit_cents must be positive".into(),
            )));
        }
    }

    let card = find_owned_card(&state, card_id, auth.customer_id).await?;
    let controls = CardRepo::upsert_controls(&state.pool, card.id, &input).await?;

    AlertRepo::create(
        &state.pool,
        &CreateAlert {
            customer_id: auth.customer_id,
            card_id: card.id,
            transaction_id: None,
            alert_type: alert_types::CONTROL_CHANGE.to_string(),
            severity: AlertSeverity::Low.as_str().to_string(),
            message: "Card controls were updated".to_string(),
            action_required: false,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new(controls)))
}

// ---------------------------------------------------------------------------
// Lock / unlock
// ---------------------------------------------------------------------------

/// POST /api/v1/cards/{card_id}/lock
///
/// Lock an ACTIVE card. Already-locked and closed cards surface their
/// specific conflict.
pub async fn lock_card(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CardResponse>>> {
    let card = find_owned_card(&state, card_id, auth.customer_id).await?;
    let updated = apply_status_transition(&state, &card, lock_transition).await?;

    state
        .corebank
        .notify_card_status(updated.id, &updated.status)
        .await;

    Ok(Json(ApiResponse::new(CardResponse::from(&updated))))
}

/// POST /api/v1/cards/{card_id}/unlock
///
/// Unlock a LOCKED card.
pub async fn unlock_card(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CardResponse>>> {
    let card = find_owned_card(&state, card_id, auth.customer_id).await?;
    let updated = apply_status_transition(&state, &card, unlock_transition).await?;

    state
        .corebank
        .notify_card_status(updated.id, &updated.status)
        .await;

    Ok(Json(ApiResponse::new(CardResponse::from(&updated))))
}

// ---------------------------------------------------------------------------
// Shared helpers (also used by the admin card handlers)
// ---------------------------------------------------------------------------

/// Resolve a card by id + owner, collapsing "absent" and "not yours" into
/// one 404.
async fn find_owned_card(state: &AppState, card_id: DbId, customer_id: DbId) -> AppResult<Card> {
    CardRepo::find_for_customer(&state.pool, card_id, customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        }))
}

/// Run a status transition and apply it with a compare-and-set update.
///
/// If the status moved between the read and the update, the transition is
/// re-evaluated against the fresh row so the caller still gets the specific
/// conflict for the state the card is actually in.
pub(crate) async fn apply_status_transition(
    state: &AppState,
    card: &Card,
    transition: fn(CardStatus) -> Result<CardStatus, CoreError>,
) -> AppResult<Card> {
    let current = card
        .status()
        .ok_or_else(|| AppError::InternalError(format!("Unknown card status: {}", card.status)))?;
    let target = transition(current)?;

    if let Some(updated) =
        CardRepo::update_status(&state.pool, card.id, current.as_str(), target.as_str()).await?
    {
        return Ok(updated);
    }

    // Lost a race: someone changed the status first. Surface the conflict
    // for the status the row has now.
    let fresh = CardRepo::find_by_id(&state.pool, card.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Card",
            id: card.id,
        }))?;
    let fresh_status = fresh.status().ok_or_else(|| {
        AppError::InternalError(format!("Unknown card status: {}", fresh.status))
    })?;
    match transition(fresh_status) {
        Err(err) => Err(AppError::Core(err)),
        // The transition would now succeed; treat the raced request as a
        // conflict rather than retrying.
        Ok(_) => Err(AppError::Core(CoreError::Conflict {
            code: "CARD_STATUS_CHANGED",
            message: "Card status changed concurrently; retry the request".into(),
        })),
    }
}
