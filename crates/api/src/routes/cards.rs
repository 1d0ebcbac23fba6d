//! Route definitions for the customer `/cards` resource.
//!
//! All endpoints require a customer token; ownership is enforced per row.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// GET    /                       -> list_cards
/// GET    /{id}                   -> get_card
/// PUT    /{id}                   -> update_controls
/// PUT    /{id}/controls          -> update_controls (explicit alias)
/// POST   /{id}/lock              -> lock_card
/// POST   /{id}/unlock            -> unlock_card
/// GET    /{id}/transactions      -> card_transactions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::list_cards))
        // PUT on the card itself updates its controls; the only mutable
        // card fields outside lock/unlock are the control toggles.
        .route(
            "/{card_id}",
            get(cards::get_card).put(cards::update_controls),
        )
        .route("/{card_id}/controls", put(cards::update_controls))
        .route("/{card_id}/lock", post(cards::lock_card))
        .route("/{card_id}/unlock", post(cards::unlock_card))
        .route("/{card_id}/transactions", get(cards::card_transactions))
}
