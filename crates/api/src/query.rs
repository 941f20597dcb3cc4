//! Query parameter types for API handlers.
//!
//! Query strings arrive as text; empty values (`?seasonCode=`) mean "no
//! constraint" and are dropped before they reach the filter builder.

use chrono::NaiveDate;
use duellog_db::models::game_match::MatchFilter;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Raw `GET /matches` query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListParams {
    pub season_code: Option<String>,
    pub mode: Option<String>,
    pub my_deck_main: Option<String>,
    pub opp_deck_main: Option<String>,
    pub result: Option<String>,
    pub play_order: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl MatchListParams {
    /// Convert into a [`MatchFilter`], parsing the date bounds.
    pub fn into_filter(self) -> AppResult<MatchFilter> {
        Ok(MatchFilter {
            date_from: parse_date("dateFrom", self.date_from.as_deref())?,
            date_to: parse_date("dateTo", self.date_to.as_deref())?,
            season_code: non_empty(self.season_code),
            mode: non_empty(self.mode),
            my_deck_main: non_empty(self.my_deck_main),
            opp_deck_main: non_empty(self.opp_deck_main),
            result: non_empty(self.result),
            play_order: non_empty(self.play_order),
        })
    }
}

/// `?gameKey=` for deck template endpoints. Falls back to the configured game.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameKeyParams {
    pub game_key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{field} must be YYYY-MM-DD, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_values_do_not_constrain() {
        let params = MatchListParams {
            season_code: Some(String::new()),
            date_from: Some(String::new()),
            opp_deck_main: Some("天盃".into()),
            ..Default::default()
        };
        let filter = params.into_filter().unwrap();
        assert!(filter.season_code.is_none());
        assert!(filter.date_from.is_none());
        assert_eq!(filter.opp_deck_main.as_deref(), Some("天盃"));
    }

    #[test]
    fn date_bounds_are_parsed() {
        let params = MatchListParams {
            date_from: Some("2026-01-01".into()),
            date_to: Some("2026-01-31".into()),
            ..Default::default()
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[test]
    fn malformed_date_is_a_bad_request() {
        let params = MatchListParams {
            date_to: Some("2026/01/31".into()),
            ..Default::default()
        };
        assert_matches!(params.into_filter(), Err(AppError::BadRequest(_)));
    }
}
