pub mod deck_templates;
pub mod health;
pub mod matches;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /matches                      list, create
/// /matches/{id}                 update, delete
/// /matches/{id}/decks           relink decks
///
/// /deck-templates               list, create
/// /deck-templates/{id}          update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/matches", matches::router())
        .nest("/deck-templates", deck_templates::router())
}
