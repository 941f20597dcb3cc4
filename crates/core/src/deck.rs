//! Deck naming rules and deck-template defaults.

use crate::error::CoreError;

/// Sub archetype placeholder meaning "no sub archetype". Never gets a template.
pub const NO_SUB: &str = "無";

/// Theme assigned to automatically created templates ("no theme", grey).
pub const NO_THEME: &str = "無";

/// Template kind for a main archetype name.
pub const DECK_TYPE_MAIN: &str = "main";

/// Template kind for a sub archetype name.
pub const DECK_TYPE_SUB: &str = "sub";

/// All valid template kinds.
pub const VALID_DECK_TYPES: &[&str] = &[DECK_TYPE_MAIN, DECK_TYPE_SUB];

/// Prefix of template ids generated on first use of a deck name.
pub const AUTO_TEMPLATE_PREFIX: &str = "tpl-auto-";

/// Maximum length for a deck or template name.
pub const MAX_DECK_NAME_LEN: usize = 100;

/// Stored template names shorter than this many bytes are treated as corrupt
/// by the maintenance purge. A single kanji is three bytes and survives.
pub const MIN_TEMPLATE_NAME_BYTES: usize = 2;

/// Whether a sub archetype name should get its own template.
pub fn sub_needs_template(sub: &str) -> bool {
    !sub.is_empty() && sub != NO_SUB
}

/// Short id for an automatically created template, e.g. `tpl-auto-1a2b3c4d`.
pub fn auto_template_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{AUTO_TEMPLATE_PREFIX}{}", &uuid[..8])
}

/// Id for a template created explicitly by the user.
pub fn template_id() -> String {
    format!("tpl-{}", uuid::Uuid::new_v4())
}

/// Validate a deck or template name: non-empty and within length limit.
pub fn validate_deck_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Deck name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_DECK_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Deck name too long: {} chars (max {MAX_DECK_NAME_LEN})",
            name.chars().count()
        )));
    }
    Ok(())
}

/// Validate that `deck_type` is one of the allowed template kinds.
pub fn validate_deck_type(deck_type: &str) -> Result<(), CoreError> {
    if VALID_DECK_TYPES.contains(&deck_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid deck type '{deck_type}'. Must be one of: {}",
            VALID_DECK_TYPES.join(", ")
        )))
    }
}

/// Whether a stored template name is malformed and should be purged: too
/// short, or not valid UTF-8.
pub fn is_malformed_template_name(raw: &[u8]) -> bool {
    raw.len() < MIN_TEMPLATE_NAME_BYTES || std::str::from_utf8(raw).is_err()
}
