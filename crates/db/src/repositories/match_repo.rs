//! Repository for the `matches` table.

use duellog_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use crate::models::game_match::{MatchDetailRow, MatchFilter, MatchRecord, MatchWithDetails};
use crate::sql_builder::{
    bind_query, bind_query_as, BindValue, Comparison, FilterBuilder, PlaceholderStyle, SetBuilder,
};

/// Column list for `matches` queries.
const COLUMNS: &str = "\
    id, user_id, game_id, season_id, date, mode, rank, \
    my_deck_id, opp_deck_id, play_order, result, note, created_at, updated_at";

/// Listing projection: the match joined with its season and both decks.
const LIST_SELECT: &str = "\
    SELECT m.id, m.date, m.mode, m.rank, m.play_order, m.result, m.note, \
           m.created_at, m.updated_at, \
           s.code AS season_code, \
           my_deck.id AS my_deck_id, my_deck.main AS my_deck_main, my_deck.sub AS my_deck_sub, \
           opp_deck.id AS opp_deck_id, opp_deck.main AS opp_deck_main, opp_deck.sub AS opp_deck_sub \
    FROM matches m \
    JOIN seasons s ON m.season_id = s.id \
    JOIN decks my_deck ON m.my_deck_id = my_deck.id \
    JOIN decks opp_deck ON m.opp_deck_id = opp_deck.id";

/// Newest first; creation time breaks ties within a day.
const LIST_ORDER: &str = " ORDER BY m.date DESC, m.created_at DESC";

/// Placeholder convention of the SQLite store.
pub const STORE_PLACEHOLDERS: PlaceholderStyle = PlaceholderStyle::Sequential;

/// Provides CRUD and filtered listing for matches.
pub struct MatchRepo;

impl MatchRepo {
    /// Insert a fully resolved match row.
    pub async fn insert(pool: &SqlitePool, record: &MatchRecord) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO matches ({COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        sqlx::query(&query)
            .bind(&record.id)
            .bind(&record.user_id)
            .bind(&record.game_id)
            .bind(&record.season_id)
            .bind(record.date)
            .bind(&record.mode)
            .bind(&record.rank)
            .bind(&record.my_deck_id)
            .bind(&record.opp_deck_id)
            .bind(&record.play_order)
            .bind(&record.result)
            .bind(&record.note)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Find a match by id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<MatchRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM matches WHERE id = ?");
        sqlx::query_as::<_, MatchRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a match with this id exists.
    pub async fn exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM matches WHERE id = ?)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Apply `assignments` plus `updated_at` to one match in a single statement.
    ///
    /// Returns `true` if the row was updated.
    pub async fn update_fields(
        pool: &SqlitePool,
        id: &str,
        assignments: &SetBuilder,
        updated_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let mut set = assignments.clone();
        set.set("updated_at", updated_at);

        let query = format!(
            "UPDATE matches SET {} WHERE id = ?",
            set.render(STORE_PLACEHOLDERS, 1)
        );
        let result = bind_query(sqlx::query(&query), set.values())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a match by id. Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM matches WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List matches matching `filter`, newest first.
    pub async fn list(
        pool: &SqlitePool,
        filter: &MatchFilter,
    ) -> Result<Vec<MatchWithDetails>, sqlx::Error> {
        Self::list_with_style(pool, filter, STORE_PLACEHOLDERS).await
    }

    /// [`MatchRepo::list`] rendered with an explicit placeholder convention.
    pub async fn list_with_style(
        pool: &SqlitePool,
        filter: &MatchFilter,
        style: PlaceholderStyle,
    ) -> Result<Vec<MatchWithDetails>, sqlx::Error> {
        let (query, values) = build_list_query(filter, style);
        let rows = bind_query_as(sqlx::query_as::<_, MatchDetailRow>(&query), &values)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(MatchWithDetails::from).collect())
    }
}

/// Collect the supplied criteria in their fixed order.
pub fn build_match_filter(filter: &MatchFilter) -> FilterBuilder {
    let mut builder = FilterBuilder::new();
    builder
        .eq_text("s.code", filter.season_code.as_deref())
        .eq_text("m.mode", filter.mode.as_deref())
        .eq_text("my_deck.main", filter.my_deck_main.as_deref())
        .eq_text("opp_deck.main", filter.opp_deck_main.as_deref())
        .eq_text("m.result", filter.result.as_deref())
        .eq_text("m.play_order", filter.play_order.as_deref())
        .cmp_date("m.date", Comparison::Gte, filter.date_from)
        .cmp_date("m.date", Comparison::Lte, filter.date_to);
    builder
}

/// Render the full listing statement and its bound values.
pub fn build_list_query(filter: &MatchFilter, style: PlaceholderStyle) -> (String, Vec<BindValue>) {
    let builder = build_match_filter(filter);
    let query = format!(
        "{LIST_SELECT}{}{LIST_ORDER}",
        builder.render_where(style, 1)
    );
    (query, builder.values().to_vec())
}

/// Identity of a newly generated match.
pub fn new_match_id() -> DbId {
    uuid::Uuid::new_v4().to_string()
}
