//! Domain rules for DuelLog that do not touch the database.
//!
//! Sentinel values, enumerations and validation helpers shared by the
//! repository layer, the HTTP boundary and the maintenance CLI.

pub mod deck;
pub mod error;
pub mod matches;
pub mod season;
pub mod types;
