//! Handlers for match records.
//!
//! Thin wrappers over [`MatchRecords`]: name resolution, validation and the
//! rank/mode rules all live in the db crate.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use duellog_core::error::CoreError;
use duellog_db::models::game_match::{CreateMatch, CreatedMatch, RelinkDecks, UpdateMatch};
use duellog_db::records::MatchRecords;
use duellog_db::repositories::MatchRepo;

use crate::error::AppResult;
use crate::query::MatchListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /matches
///
/// List matches newest first, narrowed by any supplied criteria.
pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<MatchListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let list = MatchRecords::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: list }))
}

/// POST /matches
///
/// Record a match for the configured user. Returns 201 with the new id.
pub async fn create_match(
    State(state): State<AppState>,
    Json(input): Json<CreateMatch>,
) -> AppResult<impl IntoResponse> {
    let id = MatchRecords::create(&state.pool, &state.user_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedMatch { id },
        }),
    ))
}

/// PATCH /matches/{id}
///
/// Partially update a match and return the stored row.
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMatch>,
) -> AppResult<impl IntoResponse> {
    MatchRecords::update(&state.pool, &id, &input).await?;
    respond_with_record(&state, &id).await
}

/// PUT /matches/{id}/decks
///
/// Re-point a match at different decks, resolving them by name.
pub async fn relink_decks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RelinkDecks>,
) -> AppResult<impl IntoResponse> {
    MatchRecords::relink_decks(&state.pool, &id, &input).await?;
    respond_with_record(&state, &id).await
}

/// DELETE /matches/{id}
pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    MatchRecords::delete(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn respond_with_record(state: &AppState, id: &str) -> AppResult<impl IntoResponse> {
    let record = MatchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Match",
            id: id.to_string(),
        })?;
    Ok(Json(DataResponse { data: record }))
}
