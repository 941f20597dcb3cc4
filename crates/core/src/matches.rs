//! Match recording rules: play modes, the rank sentinel, and field checks.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Mode constants
   -------------------------------------------------------------------------- */

/// Ranked ladder play. The default mode when none is given.
pub const MODE_RANKED: &str = "Ranked";

/// Rating (tournament-style) play.
pub const MODE_RATING: &str = "Rating";

/// Duelist Cup play.
pub const MODE_DC: &str = "DC";

/// All valid mode values. Mirrors the `CHECK` constraint on `matches.mode`.
pub const VALID_MODES: &[&str] = &[MODE_RANKED, MODE_RATING, MODE_DC];

/// Rank stored for non-ranked matches when no rank is supplied.
pub const NO_RANK: &str = "—";

/* --------------------------------------------------------------------------
   Mode and rank resolution
   -------------------------------------------------------------------------- */

/// Validate that `mode` is one of the allowed values.
pub fn validate_mode(mode: &str) -> Result<(), CoreError> {
    if VALID_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid mode '{mode}'. Must be one of: {}",
            VALID_MODES.join(", ")
        )))
    }
}

/// Resolve the mode to store: absent or empty means [`MODE_RANKED`].
pub fn effective_mode(mode: Option<&str>) -> Result<&str, CoreError> {
    match mode {
        None | Some("") => Ok(MODE_RANKED),
        Some(mode) => {
            validate_mode(mode)?;
            Ok(mode)
        }
    }
}

/// Whether `mode` is ranked ladder play.
pub fn is_ranked(mode: &str) -> bool {
    mode == MODE_RANKED
}

/// Resolve the rank to store for a newly created match.
///
/// Non-ranked modes without a rank get [`NO_RANK`] so the column is never
/// null. Ranked matches keep whatever was supplied (empty when absent).
pub fn effective_rank(mode: &str, rank: Option<&str>) -> String {
    match rank {
        Some(rank) if !rank.is_empty() => rank.to_string(),
        _ if !is_ranked(mode) => NO_RANK.to_string(),
        _ => String::new(),
    }
}

/* --------------------------------------------------------------------------
   Required fields
   -------------------------------------------------------------------------- */

/// Reject an empty required text field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_mode_defaults_to_ranked() {
        assert_eq!(effective_mode(None).unwrap(), MODE_RANKED);
        assert_eq!(effective_mode(Some("")).unwrap(), MODE_RANKED);
    }

    #[test]
    fn explicit_modes_are_kept() {
        assert_eq!(effective_mode(Some("Rating")).unwrap(), MODE_RATING);
        assert_eq!(effective_mode(Some("DC")).unwrap(), MODE_DC);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_matches!(effective_mode(Some("Casual")), Err(CoreError::Validation(_)));
        assert_matches!(effective_mode(Some("ranked")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_ranked_without_rank_gets_sentinel() {
        assert_eq!(effective_rank(MODE_RATING, None), NO_RANK);
        assert_eq!(effective_rank(MODE_DC, Some("")), NO_RANK);
    }

    #[test]
    fn supplied_rank_is_kept() {
        assert_eq!(effective_rank(MODE_RATING, Some("1500")), "1500");
        assert_eq!(effective_rank(MODE_RANKED, Some("大師 I")), "大師 I");
    }

    #[test]
    fn ranked_without_rank_stays_empty() {
        assert_eq!(effective_rank(MODE_RANKED, None), "");
    }

    #[test]
    fn blank_required_field_is_rejected() {
        assert!(require_non_empty("result", "W").is_ok());
        assert_matches!(require_non_empty("result", "  "), Err(CoreError::Validation(_)));
    }
}
