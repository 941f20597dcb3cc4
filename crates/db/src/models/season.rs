//! Season model.

use duellog_core::types::{Date, DbId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `seasons` table.
///
/// `start_date`/`end_date` are only set for year-month codes.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: DbId,
    pub game_id: DbId,
    pub code: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
