//! Handlers for deck templates (per-name display themes).
//!
//! Templates are scoped to a game picked by `?gameKey=`, falling back to the
//! configured default game.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use duellog_core::deck::{
    template_id, validate_deck_name, validate_deck_type, DECK_TYPE_MAIN, NO_THEME,
};
use duellog_core::error::CoreError;
use duellog_db::models::deck_template::{CreateDeckTemplate, UpdateDeckTemplate};
use duellog_db::models::game::Game;
use duellog_db::repositories::{DeckTemplateRepo, GameRepo};

use crate::error::AppResult;
use crate::query::GameKeyParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /deck-templates
///
/// One template per name and type; the earliest wins when duplicates exist.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<GameKeyParams>,
) -> AppResult<impl IntoResponse> {
    let game = find_game(&state, params.game_key.as_deref()).await?;
    let templates = DeckTemplateRepo::list_for_game(&state.pool, &game.id).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /deck-templates
///
/// Create a template explicitly. 409 if one already exists for the same
/// game, name and type.
pub async fn create_template(
    State(state): State<AppState>,
    Query(params): Query<GameKeyParams>,
    Json(input): Json<CreateDeckTemplate>,
) -> AppResult<impl IntoResponse> {
    validate_deck_name(&input.name)?;
    let deck_type = input.deck_type.as_deref().unwrap_or(DECK_TYPE_MAIN);
    validate_deck_type(deck_type)?;
    let theme = input
        .theme
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_THEME);

    let game = find_game(&state, params.game_key.as_deref()).await?;
    if DeckTemplateRepo::exists(&state.pool, &game.id, &input.name, deck_type).await? {
        return Err(CoreError::Conflict(format!(
            "A {deck_type} template named '{}' already exists",
            input.name
        ))
        .into());
    }

    let template = DeckTemplateRepo::insert(
        &state.pool,
        &template_id(),
        &game.id,
        &input.name,
        theme,
        deck_type,
    )
    .await?;

    tracing::info!(
        template_id = %template.id,
        name = %template.main,
        deck_type = %template.deck_type,
        "Deck template created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// PATCH /deck-templates/{id}
///
/// Change a template's name and/or theme.
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDeckTemplate>,
) -> AppResult<impl IntoResponse> {
    if input.name.is_none() && input.theme.is_none() {
        return Err(CoreError::Validation("No fields to update".into()).into());
    }
    if let Some(name) = input.name.as_deref() {
        validate_deck_name(name)?;
    }

    let template = DeckTemplateRepo::update(
        &state.pool,
        &id,
        input.name.as_deref(),
        input.theme.as_deref(),
    )
    .await?
    .ok_or_else(|| CoreError::NotFound {
        entity: "DeckTemplate",
        id: id.clone(),
    })?;

    tracing::info!(template_id = %template.id, "Deck template updated");
    Ok(Json(DataResponse { data: template }))
}

/// DELETE /deck-templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !DeckTemplateRepo::delete(&state.pool, &id).await? {
        return Err(CoreError::NotFound {
            entity: "DeckTemplate",
            id,
        }
        .into());
    }
    tracing::info!(template_id = %id, "Deck template deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_game(state: &AppState, key: Option<&str>) -> AppResult<Game> {
    let key = key
        .filter(|k| !k.is_empty())
        .unwrap_or(state.config.default_game_key.as_str());
    let game = GameRepo::find_by_key(&state.pool, key)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Game",
            id: key.to_string(),
        })?;
    Ok(game)
}
