//! Season code handling.
//!
//! Season codes are free-form (`"S49"`, `"2025-12"`). Only year-month codes
//! carry enough information to derive the season's calendar bounds.

use chrono::{Months, NaiveDate};

use crate::error::CoreError;

/// Maximum length for a season code.
pub const MAX_SEASON_CODE_LEN: usize = 32;

/// Validate a season code: non-empty, no surrounding whitespace, bounded length.
pub fn validate_season_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(CoreError::Validation(
            "Season code must not be empty".to_string(),
        ));
    }
    if code.trim() != code {
        return Err(CoreError::Validation(format!(
            "Season code '{code}' must not have leading or trailing whitespace"
        )));
    }
    let chars = code.chars().count();
    if chars > MAX_SEASON_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Season code too long: {chars} chars (max {MAX_SEASON_CODE_LEN})"
        )));
    }
    Ok(())
}

/// First and last day of the month named by a `YYYY-MM` season code.
///
/// Both fields are zero-padded. Returns `None` for any other code, in which
/// case the season is stored without start/end dates.
pub fn month_bounds(code: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = code.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let start = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}
