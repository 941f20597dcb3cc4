use std::sync::Arc;

use duellog_core::error::CoreError;
use duellog_core::types::DbId;
use duellog_db::repositories::UserRepo;
use duellog_db::DbPool;

use crate::config::ServerConfig;
use crate::error::AppResult;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// User every recorded match is attributed to, resolved once at startup.
    pub user_id: DbId,
}

/// Pick the recording user: the configured id if it exists, otherwise the
/// first user row.
pub async fn resolve_user_id(pool: &DbPool, configured: Option<&str>) -> AppResult<DbId> {
    let user = match configured {
        Some(id) => UserRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id: id.to_string(),
            })?,
        None => UserRepo::find_first(pool)
            .await?
            .ok_or_else(|| CoreError::Internal("No user rows in the database".into()))?,
    };
    tracing::info!(user_id = %user.id, name = %user.name, "Recording user resolved");
    Ok(user.id)
}
