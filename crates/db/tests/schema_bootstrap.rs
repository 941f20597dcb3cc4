//! Integration tests for schema bootstrap and runtime migrations.
//!
//! Covers the three starting points the bootstrapper must handle: an empty
//! store, a store created before `matches.mode` existed, and a store that
//! is already current.

use assert_matches::assert_matches;
use duellog_db::repositories::DeckRepo;
use duellog_db::schema::{
    column_exists, ensure_schema_with, index_exists, schema_is_current, table_exists,
    BaseMigration, BASE_MIGRATIONS, BASE_TABLES,
};
use duellog_db::{ensure_schema, BootstrapError};
use sqlx::SqlitePool;

/// Base scripts as shipped before the mode column was introduced.
fn pre_mode_migrations() -> &'static [BaseMigration] {
    &BASE_MIGRATIONS[..2]
}

async fn insert_legacy_match(pool: &SqlitePool) {
    sqlx::query(
        "INSERT INTO matches (id, user_id, game_id, season_id, date, rank, my_deck_id, \
         opp_deck_id, play_order, result, note, created_at, updated_at) \
         VALUES ('m-legacy', 'user-default', 'game-md', 's-1', '2025-12-30', '大師 I', \
         'd-1', 'd-2', '先攻', 'W', NULL, '2025-12-30T10:00:00+00:00', '2025-12-30T10:00:00+00:00')",
    )
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Empty store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn empty_store_gets_full_schema_and_seed_rows(pool: SqlitePool) {
    assert!(!table_exists(&pool, "matches").await.unwrap());

    ensure_schema(&pool).await.unwrap();

    for table in ["users", "games", "seasons", "decks", "deck_templates", "matches"] {
        assert!(table_exists(&pool, table).await.unwrap(), "{table} should exist");
    }
    assert!(column_exists(&pool, "matches", "mode").await.unwrap());
    assert!(index_exists(&pool, "idx_matches_mode").await.unwrap());
    assert!(schema_is_current(&pool).await.unwrap());

    let game_key: String = sqlx::query_scalar("SELECT key FROM games WHERE id = 'game-md'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(game_key, "master_duel");

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(users >= 1);
}

// ---------------------------------------------------------------------------
// Current store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn repeated_runs_are_idempotent(pool: SqlitePool) {
    ensure_schema(&pool).await.unwrap();
    insert_legacy_match(&pool).await;

    ensure_schema(&pool).await.unwrap();
    ensure_schema(&pool).await.unwrap();

    let matches: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(matches, 1, "re-running bootstrap must not touch data");

    let games: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM games")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(games, 1);
}

// ---------------------------------------------------------------------------
// Older store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn older_store_gains_mode_column_without_data_loss(pool: SqlitePool) {
    ensure_schema_with(&pool, pre_mode_migrations(), &[])
        .await
        .unwrap();
    assert!(!column_exists(&pool, "matches", "mode").await.unwrap());
    insert_legacy_match(&pool).await;

    ensure_schema(&pool).await.unwrap();

    assert!(column_exists(&pool, "matches", "mode").await.unwrap());
    assert!(index_exists(&pool, "idx_matches_mode").await.unwrap());

    let (rank, mode): (String, String) =
        sqlx::query_as("SELECT rank, mode FROM matches WHERE id = 'm-legacy'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rank, "大師 I");
    assert_eq!(mode, "Ranked");
}

#[sqlx::test(migrations = false)]
async fn mode_check_constraint_applies_after_upgrade(pool: SqlitePool) {
    ensure_schema_with(&pool, pre_mode_migrations(), &[])
        .await
        .unwrap();
    insert_legacy_match(&pool).await;
    ensure_schema(&pool).await.unwrap();

    let result = sqlx::query("UPDATE matches SET mode = 'Casual' WHERE id = 'm-legacy'")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "mode outside the enumeration must be rejected");
}

#[sqlx::test(migrations = false)]
async fn missing_index_is_restored_when_column_exists(pool: SqlitePool) {
    ensure_schema(&pool).await.unwrap();
    sqlx::query("DROP INDEX idx_matches_mode")
        .execute(&pool)
        .await
        .unwrap();

    ensure_schema(&pool).await.unwrap();

    assert!(index_exists(&pool, "idx_matches_mode").await.unwrap());
}

// ---------------------------------------------------------------------------
// Failure
// ---------------------------------------------------------------------------

/// The shipped base list with its second script replaced by a broken one.
fn broken_migrations() -> [BaseMigration; 3] {
    [
        BASE_MIGRATIONS[0],
        BaseMigration {
            name: "002_broken.sql",
            sql: "CREATE TABLE deck_templates (id TEXT PRIMARY KEY); \
                  CREATE TABLE deck_templates_oops (",
        },
        BASE_MIGRATIONS[2],
    ]
}

#[sqlx::test(migrations = false)]
async fn failing_base_migration_is_fatal_and_rolled_back(pool: SqlitePool) {
    let err = ensure_schema_with(&pool, &broken_migrations(), &[])
        .await
        .unwrap_err();
    assert_matches!(err, BootstrapError::BaseMigration { name: "002_broken.sql", .. });

    // Scripts before the broken one are rolled back with it.
    assert!(!table_exists(&pool, "users").await.unwrap());
    assert!(!table_exists(&pool, "matches").await.unwrap());
    assert!(!table_exists(&pool, "deck_templates").await.unwrap());
}

#[sqlx::test(migrations = false)]
async fn rerun_after_failed_bootstrap_builds_complete_schema(pool: SqlitePool) {
    ensure_schema_with(&pool, &broken_migrations(), &[])
        .await
        .unwrap_err();

    ensure_schema(&pool).await.unwrap();

    for &table in BASE_TABLES {
        assert!(table_exists(&pool, table).await.unwrap(), "{table} should exist");
    }
    let id = DeckRepo::resolve(&pool, "game-md", "天盃", None).await.unwrap();
    assert!(!id.is_empty());
}

#[sqlx::test(migrations = false)]
async fn store_missing_a_base_table_is_refused(pool: SqlitePool) {
    ensure_schema(&pool).await.unwrap();
    sqlx::query("DROP TABLE deck_templates")
        .execute(&pool)
        .await
        .unwrap();

    let err = ensure_schema(&pool).await.unwrap_err();

    assert_matches!(err, BootstrapError::Incomplete { table: "deck_templates" });
    assert!(!schema_is_current(&pool).await.unwrap());
}
