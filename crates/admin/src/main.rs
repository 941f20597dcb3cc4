//! Operator maintenance CLI for the DuelLog store.
//!
//! Run these with the API server stopped: renames and purges take no lock
//! beyond their own transaction.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use duellog_db::repositories::MaintenanceRepo;
use duellog_db::DbPool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "duellog-admin", version, about = "DuelLog maintenance CLI")]
struct Cli {
    /// SQLite store file (defaults to `DB_PATH`, then `./duellog.db`)
    #[arg(long, global = true)]
    db_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Create or upgrade the schema, then exit
    Migrate,
    /// Rename a deck archetype in templates, deck mains and deck subs
    RenameDeck {
        /// Current name
        old_name: String,
        /// Replacement name
        new_name: String,
    },
    /// Delete deck templates whose name is too short to be real
    PurgeTemplates,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "duellog_db=info,info".into()),
        )
        .with_target(false)
        .compact()
        .try_init();

    let cli = Cli::parse();
    let db_path = cli
        .db_path
        .or_else(|| std::env::var("DB_PATH").ok())
        .unwrap_or_else(|| "./duellog.db".into());

    let pool = duellog_db::create_pool(&db_path)
        .await
        .with_context(|| format!("opening database at {db_path}"))?;
    duellog_db::ensure_schema(&pool)
        .await
        .context("bootstrapping schema")?;

    let outcome = run(&pool, cli.command).await;
    pool.close().await;
    outcome
}

async fn run(pool: &DbPool, command: Commands) -> Result<()> {
    match command {
        Commands::Migrate => {
            info!("migrate: schema is up to date");
        }
        Commands::RenameDeck { old_name, new_name } => {
            let (old_name, new_name) = (old_name.trim(), new_name.trim());
            if old_name.is_empty() || new_name.is_empty() {
                bail!("deck names must not be empty");
            }
            if old_name == new_name {
                bail!("old and new names are identical");
            }
            if !MaintenanceRepo::name_in_use(pool, old_name).await? {
                warn!(old_name, "rename-deck: no deck or template uses this name, nothing to do");
                return Ok(());
            }

            let report = MaintenanceRepo::rename_deck(pool, old_name, new_name)
                .await
                .with_context(|| format!("renaming '{old_name}' to '{new_name}'"))?;
            info!(
                old_name,
                new_name,
                templates = report.templates,
                deck_mains = report.deck_mains,
                deck_subs = report.deck_subs,
                total = report.total(),
                "rename-deck: completed"
            );
        }
        Commands::PurgeTemplates => {
            let purged = MaintenanceRepo::purge_malformed_templates(pool).await?;
            info!(count = purged.len(), "purge-templates: completed");
        }
    }
    Ok(())
}
