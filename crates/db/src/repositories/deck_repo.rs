//! Repository for the `decks` table.
//!
//! A deck's identity is `(game_id, main, sub)` where a NULL sub and an
//! empty-string sub are different decks. Creation is check-then-insert with
//! no store constraint behind it; concurrent first use of the same identity
//! may leave duplicate rows, and lookups then resolve to the earliest one.

use duellog_core::deck::sub_needs_template;
use duellog_core::types::DbId;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::deck::Deck;
use crate::repositories::DeckTemplateRepo;

/// Column list for `decks` queries.
const COLUMNS: &str = "id, game_id, main, sub";

/// Provides get-or-create resolution and lookups for decks.
pub struct DeckRepo;

impl DeckRepo {
    /// Resolve `(game_id, main, sub)` to a deck id, creating the deck if needed.
    ///
    /// Creating a deck also ensures default templates for `main` and, when
    /// it is a real archetype name, for `sub`, in the same transaction as
    /// the deck row. Lookups never touch templates.
    pub async fn resolve(
        pool: &SqlitePool,
        game_id: &str,
        main: &str,
        sub: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        if let Some(id) = Self::find_id(pool, game_id, main, sub).await? {
            return Ok(id);
        }

        let id = uuid::Uuid::new_v4().to_string();
        let mut tx = pool.begin().await?;
        Self::insert(&mut *tx, &id, game_id, main, sub).await?;
        DeckTemplateRepo::ensure_default(&mut *tx, game_id, main).await?;
        if let Some(sub) = sub.filter(|s| sub_needs_template(s)) {
            DeckTemplateRepo::ensure_default(&mut *tx, game_id, sub).await?;
        }
        tx.commit().await?;

        tracing::info!(deck_id = %id, game_id, main, sub, "Deck created");
        Ok(id)
    }

    /// Find the id of the deck with this exact identity.
    ///
    /// An absent `sub` matches only `sub IS NULL` rows.
    pub async fn find_id(
        pool: &SqlitePool,
        game_id: &str,
        main: &str,
        sub: Option<&str>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        match sub {
            None => {
                sqlx::query_scalar::<_, DbId>(
                    "SELECT id FROM decks \
                     WHERE game_id = ? AND main = ? AND sub IS NULL \
                     ORDER BY rowid LIMIT 1",
                )
                .bind(game_id)
                .bind(main)
                .fetch_optional(pool)
                .await
            }
            Some(sub) => {
                sqlx::query_scalar::<_, DbId>(
                    "SELECT id FROM decks \
                     WHERE game_id = ? AND main = ? AND sub = ? \
                     ORDER BY rowid LIMIT 1",
                )
                .bind(game_id)
                .bind(main)
                .bind(sub)
                .fetch_optional(pool)
                .await
            }
        }
    }

    /// Find a deck by id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE id = ?");
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the decks of a game ordered by name.
    pub async fn list_for_game(pool: &SqlitePool, game_id: &str) -> Result<Vec<Deck>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM decks WHERE game_id = ? ORDER BY main, sub, rowid"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a deck row as-is.
    pub async fn insert<'e, E>(
        executor: E,
        id: &str,
        game_id: &str,
        main: &str,
        sub: Option<&str>,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO decks (id, game_id, main, sub) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(game_id)
            .bind(main)
            .bind(sub)
            .execute(executor)
            .await?;
        Ok(())
    }
}
