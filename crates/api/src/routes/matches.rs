//! Route definitions for match records.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::matches;
use crate::state::AppState;

/// Match routes mounted at `/matches`.
///
/// ```text
/// GET    /             -> list_matches
/// POST   /             -> create_match
/// PATCH  /{id}         -> update_match
/// DELETE /{id}         -> delete_match
/// PUT    /{id}/decks   -> relink_decks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(matches::list_matches).post(matches::create_match))
        .route(
            "/{id}",
            patch(matches::update_match).delete(matches::delete_match),
        )
        .route("/{id}/decks", put(matches::relink_decks))
}
