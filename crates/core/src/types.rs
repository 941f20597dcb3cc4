/// Primary keys are opaque text identifiers (UUIDs for rows created by the
/// service, hand-picked slugs for seeded rows such as `game-md`).
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date of a match or season boundary (`YYYY-MM-DD`).
pub type Date = chrono::NaiveDate;
