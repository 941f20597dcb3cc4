use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::deck_templates;
use crate::state::AppState;

/// Deck template routes mounted at `/deck-templates`.
///
/// ```text
/// GET    /       -> list_templates
/// POST   /       -> create_template
/// PATCH  /{id}   -> update_template
/// DELETE /{id}   -> delete_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(deck_templates::list_templates).post(deck_templates::create_template),
        )
        .route(
            "/{id}",
            patch(deck_templates::update_template).delete(deck_templates::delete_template),
        )
}
