//! Match record operations.
//!
//! Create, update, relink, delete and list matches. Human-entered season
//! codes and deck names are turned into stable foreign keys here, once, at
//! write time; the rows themselves only ever store ids.

use chrono::Utc;
use duellog_core::deck::validate_deck_name;
use duellog_core::error::CoreError;
use duellog_core::matches::{
    effective_mode, effective_rank, is_ranked, require_non_empty, validate_mode, NO_RANK,
};
use duellog_core::season::validate_season_code;
use duellog_core::types::DbId;
use sqlx::SqlitePool;

use crate::error::DbError;
use crate::models::deck::DeckInput;
use crate::models::game_match::{
    CreateMatch, MatchFilter, MatchList, MatchRecord, RelinkDecks, UpdateMatch,
};
use crate::repositories::match_repo::new_match_id;
use crate::repositories::{DeckRepo, GameRepo, MatchRepo, SeasonRepo};
use crate::sql_builder::SetBuilder;

/// Match record operations. All methods take the pool as first argument.
pub struct MatchRecords;

impl MatchRecords {
    /// Record a new match for `user_id` and return its id.
    ///
    /// The game must exist; the season and both decks are resolved (and
    /// created on first use). Mode defaults to `Ranked`; non-ranked matches
    /// without a rank get the "no rank" sentinel.
    pub async fn create(
        pool: &SqlitePool,
        user_id: &str,
        input: &CreateMatch,
    ) -> Result<DbId, DbError> {
        require_non_empty("gameKey", &input.game_key)?;
        validate_season_code(&input.season_code)?;
        validate_deck_name(&input.my_deck.main)?;
        validate_deck_name(&input.opp_deck.main)?;
        require_non_empty("result", &input.result)?;

        let mode = effective_mode(input.mode.as_deref())?;
        let rank = effective_rank(mode, input.rank.as_deref());

        let game = GameRepo::find_by_key(pool, &input.game_key)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Game",
                id: input.game_key.clone(),
            })?;

        let season_id = SeasonRepo::resolve(pool, &game.id, &input.season_code).await?;
        let my_deck_id = resolve_deck(pool, &game.id, &input.my_deck).await?;
        let opp_deck_id = resolve_deck(pool, &game.id, &input.opp_deck).await?;

        let now = Utc::now();
        let record = MatchRecord {
            id: new_match_id(),
            user_id: user_id.to_string(),
            game_id: game.id,
            season_id,
            date: input.date,
            mode: mode.to_string(),
            rank,
            my_deck_id,
            opp_deck_id,
            play_order: input.play_order.clone().unwrap_or_default(),
            result: input.result.clone(),
            note: input.note.clone(),
            created_at: now,
            updated_at: now,
        };
        MatchRepo::insert(pool, &record).await?;

        tracing::info!(
            match_id = %record.id,
            season = %input.season_code,
            mode = %record.mode,
            "Match recorded",
        );
        Ok(record.id)
    }

    /// Apply the fields present in `input` to an existing match.
    ///
    /// Switching to a non-ranked mode without a rank also resets the rank
    /// to the sentinel. `updated_at` is always refreshed. Deck and season
    /// links are not touched; see [`MatchRecords::relink_decks`].
    pub async fn update(pool: &SqlitePool, match_id: &str, input: &UpdateMatch) -> Result<(), DbError> {
        ensure_exists(pool, match_id).await?;

        let mut set = SetBuilder::new();
        set.set_opt("date", input.date);
        if let Some(mode) = input.mode.as_deref() {
            validate_mode(mode)?;
            set.set("mode", mode);
            if !is_ranked(mode) && input.rank.is_none() {
                set.set("rank", NO_RANK);
            }
        }
        set.set_opt("rank", input.rank.clone())
            .set_opt("play_order", input.play_order.clone())
            .set_opt("result", input.result.clone())
            .set_opt("note", input.note.clone());

        if set.is_empty() {
            return Err(CoreError::Validation("No fields to update".to_string()).into());
        }

        MatchRepo::update_fields(pool, match_id, &set, Utc::now()).await?;
        tracing::info!(match_id, fields = set.len(), "Match updated");
        Ok(())
    }

    /// Point an existing match at different decks.
    ///
    /// Each supplied deck is resolved through the same get-or-create path as
    /// [`MatchRecords::create`], under the match's own game.
    pub async fn relink_decks(
        pool: &SqlitePool,
        match_id: &str,
        input: &RelinkDecks,
    ) -> Result<(), DbError> {
        if input.my_deck.is_none() && input.opp_deck.is_none() {
            return Err(CoreError::Validation("No decks to relink".to_string()).into());
        }
        for deck in input.my_deck.iter().chain(input.opp_deck.iter()) {
            validate_deck_name(&deck.main)?;
        }

        let record = MatchRepo::find_by_id(pool, match_id)
            .await?
            .ok_or_else(|| not_found(match_id))?;

        let mut set = SetBuilder::new();
        if let Some(deck) = &input.my_deck {
            set.set("my_deck_id", resolve_deck(pool, &record.game_id, deck).await?);
        }
        if let Some(deck) = &input.opp_deck {
            set.set("opp_deck_id", resolve_deck(pool, &record.game_id, deck).await?);
        }

        MatchRepo::update_fields(pool, match_id, &set, Utc::now()).await?;
        tracing::info!(match_id, "Match decks relinked");
        Ok(())
    }

    /// Delete a match. A missing match is reported as not found.
    pub async fn delete(pool: &SqlitePool, match_id: &str) -> Result<(), DbError> {
        if !MatchRepo::delete(pool, match_id).await? {
            return Err(not_found(match_id).into());
        }
        tracing::info!(match_id, "Match deleted");
        Ok(())
    }

    /// List matches matching `filter`, newest first, with their count.
    pub async fn list(pool: &SqlitePool, filter: &MatchFilter) -> Result<MatchList, DbError> {
        let matches = MatchRepo::list(pool, filter).await?;
        let total = matches.len();
        Ok(MatchList { matches, total })
    }
}

async fn resolve_deck(pool: &SqlitePool, game_id: &str, deck: &DeckInput) -> Result<DbId, sqlx::Error> {
    DeckRepo::resolve(pool, game_id, &deck.main, deck.sub.as_deref()).await
}

async fn ensure_exists(pool: &SqlitePool, match_id: &str) -> Result<(), DbError> {
    if MatchRepo::exists(pool, match_id).await? {
        Ok(())
    } else {
        Err(not_found(match_id).into())
    }
}

fn not_found(match_id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Match",
        id: match_id.to_string(),
    }
}
