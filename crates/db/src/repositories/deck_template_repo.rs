//! Repository for the `deck_templates` table.
//!
//! Templates are keyed by deck name, not by deck row. Uniqueness per
//! `(game_id, name, deck_type)` is advisory: creation is check-then-insert
//! without a store constraint, so concurrent first use of a name can leave
//! duplicates. [`DeckTemplateRepo::list_for_game`] dedupes them at read time.

use std::collections::HashSet;

use chrono::Utc;
use duellog_core::deck::{auto_template_id, DECK_TYPE_MAIN, NO_THEME};
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use crate::models::deck_template::DeckTemplate;

/// Column list for `deck_templates` queries.
const COLUMNS: &str = "id, game_id, main, theme, deck_type, created_at";

/// Provides CRUD and ensure-default operations for deck templates.
pub struct DeckTemplateRepo;

impl DeckTemplateRepo {
    /// Make sure a `main` template exists for `name`, inserting one with the
    /// "no theme" value when absent.
    ///
    /// Runs on the caller's connection so it can share a transaction with
    /// the deck insert. Returns `true` if a template was created.
    pub async fn ensure_default(
        conn: &mut SqliteConnection,
        game_id: &str,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        if Self::exists(&mut *conn, game_id, name, DECK_TYPE_MAIN).await? {
            return Ok(false);
        }

        let id = auto_template_id();
        Self::insert(&mut *conn, &id, game_id, name, NO_THEME, DECK_TYPE_MAIN).await?;
        tracing::info!(template_id = %id, game_id, name, "Deck template auto-created");
        Ok(true)
    }

    /// Whether a template exists for `(game_id, name, deck_type)`.
    pub async fn exists<'e, E>(
        executor: E,
        game_id: &str,
        name: &str,
        deck_type: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM deck_templates \
             WHERE game_id = ? AND main = ? AND deck_type = ?)",
        )
        .bind(game_id)
        .bind(name)
        .bind(deck_type)
        .fetch_one(executor)
        .await
    }

    /// Insert a template row, returning it.
    pub async fn insert<'e, E>(
        executor: E,
        id: &str,
        game_id: &str,
        name: &str,
        theme: &str,
        deck_type: &str,
    ) -> Result<DeckTemplate, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO deck_templates (id, game_id, main, theme, deck_type, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeckTemplate>(&query)
            .bind(id)
            .bind(game_id)
            .bind(name)
            .bind(theme)
            .bind(deck_type)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Find a template by id.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: &str,
    ) -> Result<Option<DeckTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deck_templates WHERE id = ?");
        sqlx::query_as::<_, DeckTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every template row for a game, duplicates included.
    pub async fn list_all_for_game(
        pool: &SqlitePool,
        game_id: &str,
    ) -> Result<Vec<DeckTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deck_templates WHERE game_id = ? \
             ORDER BY main, deck_type, created_at, rowid"
        );
        sqlx::query_as::<_, DeckTemplate>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// List the templates of a game with at most one row per `(name, deck_type)`.
    ///
    /// When duplicates exist the earliest created row wins.
    pub async fn list_for_game(
        pool: &SqlitePool,
        game_id: &str,
    ) -> Result<Vec<DeckTemplate>, sqlx::Error> {
        let rows = Self::list_all_for_game(pool, game_id).await?;
        let mut seen = HashSet::new();
        Ok(rows
            .into_iter()
            .filter(|t| seen.insert((t.main.clone(), t.deck_type.clone())))
            .collect())
    }

    /// Update a template's name and/or theme.
    ///
    /// Returns `None` if no template with the given id exists.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        name: Option<&str>,
        theme: Option<&str>,
    ) -> Result<Option<DeckTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE deck_templates SET \
                 main = COALESCE(?, main), \
                 theme = COALESCE(?, theme) \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeckTemplate>(&query)
            .bind(name)
            .bind(theme)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template by id. Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM deck_templates WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
