//! Repository for the read-only `users` table.

use sqlx::SqlitePool;

use crate::models::user::User;

/// Lookups for the (single) recording user.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The earliest user row. Used once at startup to pick the recording
    /// identity when none is configured.
    pub async fn find_first(pool: &SqlitePool) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY rowid LIMIT 1")
            .fetch_optional(pool)
            .await
    }
}
