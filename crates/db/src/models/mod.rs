//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs where the entity is written by callers

pub mod deck;
pub mod deck_template;
pub mod game;
pub mod game_match;
pub mod season;
pub mod user;
