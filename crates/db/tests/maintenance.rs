//! Integration tests for the operator maintenance actions.

use chrono::NaiveDate;
use duellog_db::ensure_schema;
use duellog_db::models::deck::{DeckInput, RenameReport};
use duellog_db::models::game_match::{CreateMatch, MatchFilter};
use duellog_db::records::MatchRecords;
use duellog_db::repositories::{DeckRepo, DeckTemplateRepo, MaintenanceRepo};
use sqlx::SqlitePool;

const GAME: &str = "game-md";

async fn names(pool: &SqlitePool, query: &str) -> Vec<String> {
    sqlx::query_scalar(query).fetch_all(pool).await.unwrap()
}

/// Two decks that mention "ティアラ" as main and as sub, plus its template.
async fn seed_decks(pool: &SqlitePool) {
    ensure_schema(pool).await.unwrap();
    DeckRepo::resolve(pool, GAME, "ティアラ", None).await.unwrap();
    DeckRepo::resolve(pool, GAME, "蛇眼", Some("ティアラ")).await.unwrap();
}

#[sqlx::test(migrations = false)]
async fn rename_rewrites_templates_mains_and_subs(pool: SqlitePool) {
    seed_decks(&pool).await;
    let match_input = CreateMatch {
        game_key: "master_duel".into(),
        season_code: "S49".into(),
        date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        mode: None,
        rank: None,
        my_deck: DeckInput::new("蛇眼", Some("ティアラ")),
        opp_deck: DeckInput::new("ティアラ", None),
        play_order: None,
        result: "W".into(),
        note: None,
    };
    MatchRecords::create(&pool, "user-default", &match_input).await.unwrap();

    let report = MaintenanceRepo::rename_deck(&pool, "ティアラ", "ティアラメンツ")
        .await
        .unwrap();
    assert_eq!(
        report,
        RenameReport {
            templates: 1,
            deck_mains: 1,
            deck_subs: 1,
        }
    );
    assert_eq!(report.total(), 3);

    assert_eq!(
        names(&pool, "SELECT main FROM deck_templates WHERE main LIKE 'ティアラ%'").await,
        vec!["ティアラメンツ"]
    );
    assert!(!MaintenanceRepo::name_in_use(&pool, "ティアラ").await.unwrap());
    assert!(MaintenanceRepo::name_in_use(&pool, "ティアラメンツ").await.unwrap());

    // Matches keep their deck ids, so listings pick up the new name.
    let listed = MatchRecords::list(&pool, &MatchFilter::default()).await.unwrap();
    assert_eq!(listed.matches[0].opp_deck.main, "ティアラメンツ");
    assert_eq!(listed.matches[0].my_deck.sub.as_deref(), Some("ティアラメンツ"));
}

#[sqlx::test(migrations = false)]
async fn failed_rename_step_rolls_back_every_step(pool: SqlitePool) {
    seed_decks(&pool).await;
    sqlx::query(
        "CREATE TRIGGER block_sub_rename BEFORE UPDATE OF sub ON decks \
         BEGIN SELECT RAISE(ABORT, 'forced'); END;",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = MaintenanceRepo::rename_deck(&pool, "ティアラ", "ティアラメンツ").await;
    assert!(result.is_err());

    assert_eq!(
        names(&pool, "SELECT main FROM deck_templates WHERE main = 'ティアラ'").await,
        vec!["ティアラ"]
    );
    assert_eq!(
        names(&pool, "SELECT main FROM decks WHERE main = 'ティアラ'").await,
        vec!["ティアラ"]
    );
    assert_eq!(
        names(&pool, "SELECT sub FROM decks WHERE sub = 'ティアラ'").await,
        vec!["ティアラ"]
    );
    assert!(!MaintenanceRepo::name_in_use(&pool, "ティアラメンツ").await.unwrap());
}

#[sqlx::test(migrations = false)]
async fn rename_of_unknown_name_touches_nothing(pool: SqlitePool) {
    seed_decks(&pool).await;

    let report = MaintenanceRepo::rename_deck(&pool, "存在しない", "新しい")
        .await
        .unwrap();
    assert_eq!(report, RenameReport::default());
}

async fn insert_raw_template(pool: &SqlitePool, id: &str, name_sql: &str) {
    let query = format!(
        "INSERT INTO deck_templates (id, game_id, main, theme, deck_type, created_at) \
         VALUES ('{id}', '{GAME}', {name_sql}, '無', 'main', '2026-01-01T00:00:00+00:00')"
    );
    sqlx::query(&query).execute(pool).await.unwrap();
}

#[sqlx::test(migrations = false)]
async fn purge_removes_short_and_invalid_utf8_names(pool: SqlitePool) {
    ensure_schema(&pool).await.unwrap();
    insert_raw_template(&pool, "tpl-broken", "CAST(X'E89B' AS TEXT)").await;
    insert_raw_template(&pool, "tpl-short", "'x'").await;
    DeckTemplateRepo::insert(&pool, "tpl-kanji", GAME, "炎", "無", "main")
        .await
        .unwrap();
    DeckTemplateRepo::insert(&pool, "tpl-good", GAME, "天盃", "無", "main")
        .await
        .unwrap();

    let purged = MaintenanceRepo::purge_malformed_templates(&pool).await.unwrap();
    assert_eq!(purged, vec!["tpl-broken".to_string(), "tpl-short".to_string()]);

    let mut remaining: Vec<String> = DeckTemplateRepo::list_all_for_game(&pool, GAME)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    remaining.sort();
    assert_eq!(remaining, vec!["tpl-good", "tpl-kanji"]);
}

#[sqlx::test(migrations = false)]
async fn purge_keeps_single_kanji_names(pool: SqlitePool) {
    ensure_schema(&pool).await.unwrap();
    DeckTemplateRepo::insert(&pool, "tpl-one", GAME, "炎", "無", "main")
        .await
        .unwrap();

    let purged = MaintenanceRepo::purge_malformed_templates(&pool).await.unwrap();

    assert!(purged.is_empty());
    assert_eq!(template_ids(&pool).await, vec!["tpl-one"]);
}

async fn template_ids(pool: &SqlitePool) -> Vec<String> {
    names(pool, "SELECT id FROM deck_templates ORDER BY id").await
}
