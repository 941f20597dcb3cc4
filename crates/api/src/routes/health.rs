//! Liveness and readiness of the recording service.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use duellog_db::schema::schema_is_current;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store is unreachable or behind.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Base tables and runtime migrations are all in place.
    pub schema_current: bool,
    /// User new matches are attributed to.
    pub recording_user: String,
    /// Game used when a request names none.
    pub default_game: String,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = duellog_db::health_check(&state.pool).await.is_ok();
    let schema_current = db_healthy
        && schema_is_current(&state.pool).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Schema check failed");
            false
        });

    let status = if db_healthy && schema_current {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_current,
        recording_user: state.user_id.clone(),
        default_game: state.config.default_game_key.clone(),
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
