//! SQLite persistence for DuelLog.
//!
//! - [`schema`] bootstraps and migrates the store at startup.
//! - [`repositories`] hold one zero-sized repo per table, including the
//!   get-or-create entity resolution for seasons, decks and deck templates.
//! - [`sql_builder`] composes dynamic `WHERE`/`SET` clauses with bound values.
//! - [`records`] implements the match record operations on top of the repos.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod error;
pub mod models;
pub mod records;
pub mod repositories;
pub mod schema;
pub mod sql_builder;

pub use error::{is_unique_violation, DbError};
pub use schema::{ensure_schema, BootstrapError};

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool for the SQLite file at `db_path`.
///
/// The file is created if missing. WAL mode lets readers proceed while the
/// single writer holds the lock; the busy timeout absorbs short write
/// contention between pool connections.
pub async fn create_pool(db_path: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
