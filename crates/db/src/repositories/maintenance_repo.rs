//! Operator maintenance actions. Not reachable from the HTTP API.
//!
//! These rewrite identity text in bulk and hold no lock beyond their own
//! transaction: callers must make sure no live match recording targets the
//! same names while they run.

use duellog_core::deck::is_malformed_template_name;
use sqlx::SqlitePool;

use crate::models::deck::RenameReport;

/// Bulk rename and cleanup across decks and deck templates.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Whether `name` appears as a deck main/sub or as a template name.
    pub async fn name_in_use(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM decks WHERE main = ? OR sub = ?) \
                 OR EXISTS(SELECT 1 FROM deck_templates WHERE main = ?)",
        )
        .bind(name)
        .bind(name)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Rename `old_name` to `new_name` in template names, deck mains and deck
    /// subs, atomically.
    ///
    /// The three rewrites run in one transaction in that order; if any of
    /// them fails, none of them is kept.
    pub async fn rename_deck(
        pool: &SqlitePool,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let templates = sqlx::query("UPDATE deck_templates SET main = ? WHERE main = ?")
            .bind(new_name)
            .bind(old_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!(old_name, new_name, rows = templates, "Renamed deck_templates.main");

        let deck_mains = sqlx::query("UPDATE decks SET main = ? WHERE main = ?")
            .bind(new_name)
            .bind(old_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!(old_name, new_name, rows = deck_mains, "Renamed decks.main");

        let deck_subs = sqlx::query("UPDATE decks SET sub = ? WHERE sub = ?")
            .bind(new_name)
            .bind(old_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!(old_name, new_name, rows = deck_subs, "Renamed decks.sub");

        tx.commit().await?;

        Ok(RenameReport {
            templates,
            deck_mains,
            deck_subs,
        })
    }

    /// Delete templates whose stored name is shorter than two bytes or is not
    /// valid UTF-8.
    ///
    /// Names are read as raw bytes so corrupt rows do not abort the scan.
    /// Returns the ids of the deleted templates.
    pub async fn purge_malformed_templates(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let rows: Vec<(String, Vec<u8>)> =
            sqlx::query_as("SELECT id, CAST(main AS BLOB) FROM deck_templates ORDER BY rowid")
                .fetch_all(&mut *tx)
                .await?;

        let mut purged = Vec::new();
        for (id, raw) in rows {
            if !is_malformed_template_name(&raw) {
                continue;
            }
            sqlx::query("DELETE FROM deck_templates WHERE id = ?")
                .bind(&id)
                .execute(&mut *tx)
                .await?;
            tracing::info!(
                template_id = %id,
                name = %String::from_utf8_lossy(&raw),
                bytes = ?raw,
                "Purged malformed deck template",
            );
            purged.push(id);
        }

        tx.commit().await?;
        Ok(purged)
    }
}
