//! Deck model and the deck identity DTO shared by match requests.

use duellog_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `decks` table.
///
/// `sub = None` and `sub = Some("")` are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DbId,
    pub game_id: DbId,
    pub main: String,
    pub sub: Option<String>,
}

/// A deck as entered by the user: main archetype plus optional sub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeckInput {
    pub main: String,
    #[serde(default)]
    pub sub: Option<String>,
}

impl DeckInput {
    pub fn new(main: &str, sub: Option<&str>) -> Self {
        Self {
            main: main.to_string(),
            sub: sub.map(str::to_string),
        }
    }
}

/// Deck reference embedded in match listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckRef {
    pub id: DbId,
    pub main: String,
    pub sub: Option<String>,
}

/// Per-step row counts reported by a deck rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameReport {
    pub templates: u64,
    pub deck_mains: u64,
    pub deck_subs: u64,
}

impl RenameReport {
    pub fn total(&self) -> u64 {
        self.templates + self.deck_mains + self.deck_subs
    }
}
