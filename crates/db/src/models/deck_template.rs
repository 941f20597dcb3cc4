//! Deck template (display theme) model and DTOs.

use duellog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `deck_templates` table. `main` holds the deck name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckTemplate {
    pub id: DbId,
    pub game_id: DbId,
    #[serde(rename = "name")]
    pub main: String,
    pub theme: String,
    pub deck_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a template explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeckTemplate {
    pub name: String,
    /// Defaults to the "no theme" value.
    pub theme: Option<String>,
    /// `main` or `sub`. Defaults to `main`.
    pub deck_type: Option<String>,
}

/// DTO for editing a template. Only `name` and `theme` are mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeckTemplate {
    pub name: Option<String>,
    pub theme: Option<String>,
}
