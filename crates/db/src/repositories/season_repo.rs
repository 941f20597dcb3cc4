//! Repository for the `seasons` table.
//!
//! Seasons are created lazily the first time a code is referenced.
//! `(game_id, code)` carries a UNIQUE constraint, so concurrent first use of
//! the same code converges on a single row via read-after-conflict.

use duellog_core::season::month_bounds;
use duellog_core::types::{Date, DbId};
use sqlx::SqlitePool;

use crate::error::is_unique_violation;
use crate::models::season::Season;

/// Column list for `seasons` queries.
const COLUMNS: &str = "id, game_id, code, start_date, end_date";

/// Provides get-or-create resolution and lookups for seasons.
pub struct SeasonRepo;

impl SeasonRepo {
    /// Resolve `(game_id, code)` to a season id, creating the season if needed.
    ///
    /// A uniqueness violation on insert means another writer created the
    /// season first; its id is re-read and returned. Any other failure is
    /// propagated unchanged.
    pub async fn resolve(pool: &SqlitePool, game_id: &str, code: &str) -> Result<DbId, sqlx::Error> {
        if let Some(id) = Self::find_id(pool, game_id, code).await? {
            return Ok(id);
        }

        let id = uuid::Uuid::new_v4().to_string();
        let (start_date, end_date) = month_bounds(code).unzip();

        match Self::insert(pool, &id, game_id, code, start_date, end_date).await {
            Ok(()) => {
                tracing::info!(season_id = %id, game_id, code, "Season created");
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => {
                match Self::find_id(pool, game_id, code).await? {
                    Some(winner) => {
                        tracing::debug!(season_id = %winner, code, "Season created concurrently, using existing row");
                        Ok(winner)
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Find the id of the season with `code` under `game_id`.
    pub async fn find_id(
        pool: &SqlitePool,
        game_id: &str,
        code: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM seasons WHERE game_id = ? AND code = ?")
            .bind(game_id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a season by id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons WHERE id = ?");
        sqlx::query_as::<_, Season>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the seasons of a game, most recent code first.
    pub async fn list_for_game(pool: &SqlitePool, game_id: &str) -> Result<Vec<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons WHERE game_id = ? ORDER BY code DESC");
        sqlx::query_as::<_, Season>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a season row as-is.
    pub async fn insert(
        pool: &SqlitePool,
        id: &str,
        game_id: &str,
        code: &str,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO seasons (id, game_id, code, start_date, end_date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(game_id)
        .bind(code)
        .bind(start_date)
        .bind(end_date)
        .execute(pool)
        .await?;
        Ok(())
    }
}
