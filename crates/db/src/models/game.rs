//! Game reference rows. Seeded out-of-band, read-only to the service.

use duellog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub key: String,
    pub name: String,
}
