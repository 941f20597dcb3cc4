//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod deck_repo;
pub mod deck_template_repo;
pub mod game_repo;
pub mod maintenance_repo;
pub mod match_repo;
pub mod season_repo;
pub mod user_repo;

pub use deck_repo::DeckRepo;
pub use deck_template_repo::DeckTemplateRepo;
pub use game_repo::GameRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use match_repo::MatchRepo;
pub use season_repo::SeasonRepo;
pub use user_repo::UserRepo;
