use duellog_core::error::CoreError;

/// Error returned by operations that combine domain rules with store access.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error (not found, invalid input, conflict).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any store failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Whether `err` is a uniqueness violation raised by the store.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
