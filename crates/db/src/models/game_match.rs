//! Match models, request DTOs and list filter.
//!
//! The module is named `game_match` because `match` is a keyword.

use duellog_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::deck::{DeckInput, DeckRef};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `matches` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub game_id: DbId,
    pub season_id: DbId,
    pub date: Date,
    pub mode: String,
    pub rank: String,
    pub my_deck_id: DbId,
    pub opp_deck_id: DbId,
    pub play_order: String,
    pub result: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat row produced by the listing join; folded into [`MatchWithDetails`].
#[derive(Debug, Clone, FromRow)]
pub struct MatchDetailRow {
    pub id: DbId,
    pub date: Date,
    pub mode: String,
    pub rank: String,
    pub play_order: String,
    pub result: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub season_code: String,
    pub my_deck_id: DbId,
    pub my_deck_main: String,
    pub my_deck_sub: Option<String>,
    pub opp_deck_id: DbId,
    pub opp_deck_main: String,
    pub opp_deck_sub: Option<String>,
}

/// A match joined with its season code and both decks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWithDetails {
    pub id: DbId,
    pub date: Date,
    pub mode: String,
    pub rank: String,
    pub play_order: String,
    pub result: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub season_code: String,
    pub my_deck: DeckRef,
    pub opp_deck: DeckRef,
}

impl From<MatchDetailRow> for MatchWithDetails {
    fn from(row: MatchDetailRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            mode: row.mode,
            rank: row.rank,
            play_order: row.play_order,
            result: row.result,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
            season_code: row.season_code,
            my_deck: DeckRef {
                id: row.my_deck_id,
                main: row.my_deck_main,
                sub: row.my_deck_sub,
            },
            opp_deck: DeckRef {
                id: row.opp_deck_id,
                main: row.opp_deck_main,
                sub: row.opp_deck_sub,
            },
        }
    }
}

/// Ordered listing result with its count.
#[derive(Debug, Clone, Serialize)]
pub struct MatchList {
    pub matches: Vec<MatchWithDetails>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for recording a new match.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatch {
    pub game_key: String,
    pub season_code: String,
    pub date: Date,
    /// Defaults to `Ranked`.
    pub mode: Option<String>,
    /// Forced to the "no rank" sentinel for non-ranked modes when absent.
    pub rank: Option<String>,
    pub my_deck: DeckInput,
    pub opp_deck: DeckInput,
    pub play_order: Option<String>,
    pub result: String,
    pub note: Option<String>,
}

/// DTO for a partial match update. Only present fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatch {
    pub date: Option<Date>,
    pub mode: Option<String>,
    pub rank: Option<String>,
    pub play_order: Option<String>,
    pub result: Option<String>,
    pub note: Option<String>,
}

/// DTO for re-pointing a match at different decks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelinkDecks {
    pub my_deck: Option<DeckInput>,
    pub opp_deck: Option<DeckInput>,
}

/// Returned after a match is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedMatch {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional criteria for `GET /matches`. Absent or empty criteria do not
/// constrain the listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFilter {
    pub season_code: Option<String>,
    pub mode: Option<String>,
    pub my_deck_main: Option<String>,
    pub opp_deck_main: Option<String>,
    pub result: Option<String>,
    pub play_order: Option<String>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}
