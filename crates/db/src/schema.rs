//! Schema bootstrap and additive runtime migrations.
//!
//! [`ensure_schema`] runs once at startup and brings any store up to date:
//!
//! 1. An empty store (no `matches` table) gets the ordered base scripts from
//!    `db/migrations/` in a single transaction: either all of them land or
//!    none do.
//! 2. A store that has `matches` but lacks any other base table is refused.
//! 3. Every store then gets each [`AdditiveChange`] that is still missing.
//!    Columns and indexes are probed independently, so a store that was
//!    interrupted halfway through an earlier upgrade converges on re-run.

use sqlx::SqlitePool;

/// Table whose absence marks a store that has never been initialised.
const FACT_TABLE: &str = "matches";

/// Tables every initialised store must have.
pub const BASE_TABLES: &[&str] = &[
    "users",
    "games",
    "seasons",
    "decks",
    "deck_templates",
    "matches",
];

/// A named base migration script, embedded at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BaseMigration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Base scripts in application order.
pub const BASE_MIGRATIONS: &[BaseMigration] = &[
    BaseMigration {
        name: "001_create_schema.sql",
        sql: include_str!("../../../db/migrations/001_create_schema.sql"),
    },
    BaseMigration {
        name: "002_add_deck_theme.sql",
        sql: include_str!("../../../db/migrations/002_add_deck_theme.sql"),
    },
    BaseMigration {
        name: "003_add_match_mode.sql",
        sql: include_str!("../../../db/migrations/003_add_match_mode.sql"),
    },
];

/// A schema object that older stores may lack.
#[derive(Debug, Clone, Copy)]
pub enum AdditiveChange {
    Column {
        table: &'static str,
        column: &'static str,
        ddl: &'static str,
    },
    Index {
        name: &'static str,
        ddl: &'static str,
    },
}

impl AdditiveChange {
    /// Short label for log lines and errors, e.g. `matches.mode`.
    pub fn label(&self) -> String {
        match self {
            AdditiveChange::Column { table, column, .. } => format!("{table}.{column}"),
            AdditiveChange::Index { name, .. } => (*name).to_string(),
        }
    }
}

/// Additive changes checked on every startup.
pub const ADDITIVE_CHANGES: &[AdditiveChange] = &[
    AdditiveChange::Column {
        table: "matches",
        column: "mode",
        ddl: "ALTER TABLE matches ADD COLUMN mode TEXT NOT NULL DEFAULT 'Ranked' \
              CHECK (mode IN ('Ranked','Rating','DC'))",
    },
    AdditiveChange::Index {
        name: "idx_matches_mode",
        ddl: "CREATE INDEX IF NOT EXISTS idx_matches_mode ON matches(mode)",
    },
];

/// Failure while bootstrapping the schema. The service must not start.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to inspect schema: {0}")]
    Inspect(#[source] sqlx::Error),

    #[error("Failed to apply base migration {name}: {source}")]
    BaseMigration {
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Schema is incomplete: table {table} is missing")]
    Incomplete { table: &'static str },

    #[error("Failed to apply runtime migration {label}: {source}")]
    Additive {
        label: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Ensure the store has the full current schema.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), BootstrapError> {
    ensure_schema_with(pool, BASE_MIGRATIONS, ADDITIVE_CHANGES).await
}

/// [`ensure_schema`] with explicit migration lists.
pub async fn ensure_schema_with(
    pool: &SqlitePool,
    base: &[BaseMigration],
    additive: &[AdditiveChange],
) -> Result<(), BootstrapError> {
    let exists = table_exists(pool, FACT_TABLE)
        .await
        .map_err(BootstrapError::Inspect)?;

    if !exists {
        tracing::info!(
            count = base.len(),
            "Database is empty, applying base schema migrations"
        );
        apply_base_migrations(pool, base).await?;
        tracing::info!("Base schema is ready");
    } else {
        check_base_tables(pool).await?;
    }

    for change in additive {
        apply_if_missing(pool, change).await?;
    }

    Ok(())
}

async fn apply_base_migrations(
    pool: &SqlitePool,
    base: &[BaseMigration],
) -> Result<(), BootstrapError> {
    let Some(first) = base.first() else {
        return Ok(());
    };
    let mut tx = pool
        .begin()
        .await
        .map_err(|source| BootstrapError::BaseMigration {
            name: first.name,
            source,
        })?;

    for migration in base {
        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(|source| BootstrapError::BaseMigration {
                name: migration.name,
                source,
            })?;
        tracing::info!(migration = migration.name, "Applied base migration");
    }

    let last = base.last().unwrap_or(first);
    tx.commit()
        .await
        .map_err(|source| BootstrapError::BaseMigration {
            name: last.name,
            source,
        })?;
    Ok(())
}

/// Refuse a store whose base scripts only partly landed.
async fn check_base_tables(pool: &SqlitePool) -> Result<(), BootstrapError> {
    for &table in BASE_TABLES {
        if !table_exists(pool, table)
            .await
            .map_err(BootstrapError::Inspect)?
        {
            tracing::error!(table, "Base table missing from an initialised store");
            return Err(BootstrapError::Incomplete { table });
        }
    }
    Ok(())
}

async fn change_present(pool: &SqlitePool, change: &AdditiveChange) -> Result<bool, sqlx::Error> {
    match change {
        AdditiveChange::Column { table, column, .. } => column_exists(pool, table, column).await,
        AdditiveChange::Index { name, .. } => index_exists(pool, name).await,
    }
}

async fn apply_if_missing(
    pool: &SqlitePool,
    change: &AdditiveChange,
) -> Result<(), BootstrapError> {
    let present = change_present(pool, change)
        .await
        .map_err(BootstrapError::Inspect)?;

    if present {
        tracing::debug!(change = %change.label(), "Runtime migration already applied");
        return Ok(());
    }

    let ddl = match change {
        AdditiveChange::Column { ddl, .. } | AdditiveChange::Index { ddl, .. } => *ddl,
    };
    sqlx::query(ddl)
        .execute(pool)
        .await
        .map_err(|source| BootstrapError::Additive {
            label: change.label(),
            source,
        })?;

    tracing::info!(change = %change.label(), "Applied runtime migration");
    Ok(())
}

/// Whether every base table and every additive change is present.
pub async fn schema_is_current(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    for &table in BASE_TABLES {
        if !table_exists(pool, table).await? {
            return Ok(false);
        }
    }
    for change in ADDITIVE_CHANGES {
        if !change_present(pool, change).await? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether a table named `table` exists.
pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    let name: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? LIMIT 1",
    )
    .bind(table)
    .fetch_optional(pool)
    .await?;
    Ok(name.is_some_and(|n| n.eq_ignore_ascii_case(table)))
}

/// Whether `table` has a column named `column`.
pub async fn column_exists(
    pool: &SqlitePool,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Whether an index named `name` exists.
pub async fn index_exists(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
