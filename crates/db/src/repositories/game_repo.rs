//! Repository for the read-only `games` table.

use sqlx::SqlitePool;

use crate::models::game::Game;

/// Column list for `games` queries.
const COLUMNS: &str = "id, key, name";

/// Lookups for seeded games.
pub struct GameRepo;

impl GameRepo {
    /// Find a game by its short key, e.g. `master_duel`.
    pub async fn find_by_key(pool: &SqlitePool, key: &str) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE key = ?");
        sqlx::query_as::<_, Game>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }
}
