#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime incident record types and the calendar/victim classifications
//! derived from them.
//!
//! [`Incident`] is the raw row handed over by the dataset loader.
//! [`DerivedIncident`] is the same row with the calendar and categorical
//! fields that every analytical question groups on.

use std::ops::RangeInclusive;

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Quarter-of-year season used to partition incidents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Season {
    /// January through March
    Winter,
    /// April through June
    Spring,
    /// July through September
    Summer,
    /// October through December
    Fall,
}

impl Season {
    /// Returns the season containing the given calendar month (1-12).
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not in the range 1-12.
    pub const fn from_month(month: u32) -> Result<Self, InvalidMonthError> {
        match month {
            1..=3 => Ok(Self::Winter),
            4..=6 => Ok(Self::Spring),
            7..=9 => Ok(Self::Summer),
            10..=12 => Ok(Self::Fall),
            _ => Err(InvalidMonthError { month }),
        }
    }

    /// Returns the season a calendar date falls in.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month0() / 3 {
            0 => Self::Winter,
            1 => Self::Spring,
            2 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Returns the months covered by this season.
    #[must_use]
    pub const fn months(self) -> RangeInclusive<u32> {
        match self {
            Self::Winter => 1..=3,
            Self::Spring => 4..=6,
            Self::Summer => 7..=9,
            Self::Fall => 10..=12,
        }
    }

    /// Returns all variants of this enum in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Winter, Self::Spring, Self::Summer, Self::Fall]
    }
}

/// Error returned when a month number is outside 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonthError {
    /// The month value that was provided.
    pub month: u32,
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month {}: expected 1-12", self.month)
    }
}

impl std::error::Error for InvalidMonthError {}

/// Victim age bracket.
///
/// Ages outside every decade range, and missing ages, fall into
/// [`AgeBracket::Unbracketed`], which age-bracket analyses skip.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AgeBracket {
    /// Ages 20 through 29
    #[serde(rename = "20-29")]
    #[strum(serialize = "20-29")]
    Twenties,
    /// Ages 30 through 39
    #[serde(rename = "30-39")]
    #[strum(serialize = "30-39")]
    Thirties,
    /// Ages 40 through 49
    #[serde(rename = "40-49")]
    #[strum(serialize = "40-49")]
    Forties,
    /// Ages 50 through 59
    #[serde(rename = "50-59")]
    #[strum(serialize = "50-59")]
    Fifties,
    /// Missing age or outside every bracket
    #[serde(rename = "unbracketed")]
    #[strum(serialize = "unbracketed")]
    Unbracketed,
}

impl AgeBracket {
    /// Classifies a victim age. Never fails: anything outside 20-59 is
    /// [`Self::Unbracketed`].
    #[must_use]
    pub const fn from_age(age: Option<i32>) -> Self {
        match age {
            Some(20..=29) => Self::Twenties,
            Some(30..=39) => Self::Thirties,
            Some(40..=49) => Self::Forties,
            Some(50..=59) => Self::Fifties,
            _ => Self::Unbracketed,
        }
    }

    /// Returns the inclusive age range of this bracket, or `None` for
    /// [`Self::Unbracketed`].
    #[must_use]
    pub const fn ages(self) -> Option<RangeInclusive<i32>> {
        match self {
            Self::Twenties => Some(20..=29),
            Self::Thirties => Some(30..=39),
            Self::Forties => Some(40..=49),
            Self::Fifties => Some(50..=59),
            Self::Unbracketed => None,
        }
    }

    /// Whether this bracket takes part in age-bracket analyses.
    #[must_use]
    pub const fn is_bracketed(self) -> bool {
        !matches!(self, Self::Unbracketed)
    }

    /// Returns the four decade brackets, excluding [`Self::Unbracketed`].
    #[must_use]
    pub const fn bracketed() -> &'static [Self] {
        &[Self::Twenties, Self::Thirties, Self::Forties, Self::Fifties]
    }
}

/// A raw reported-crime row as supplied by the dataset loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Raw report date. The first 10 characters hold an `MM/dd/yyyy` date.
    pub report_date: String,
    /// Report number. Unique across the dataset.
    pub report_no: String,
    /// Offense description (e.g. "BATTERY - SIMPLE ASSAULT").
    pub crime_description: String,
    /// Victim age. `None` for crimes without a person victim.
    pub victim_age: Option<i32>,
}

/// An [`Incident`] with its calendar and categorical fields computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedIncident {
    /// Report number.
    pub report_no: String,
    /// Offense description.
    pub crime_description: String,
    /// Victim age, unchanged from the raw row.
    pub victim_age: Option<i32>,
    /// Parsed report date.
    pub date_reported: NaiveDate,
    /// Calendar year of `date_reported`.
    pub year: i32,
    /// Calendar month (1-12) of `date_reported`.
    pub month: u32,
    /// Season of `month`.
    pub season: Season,
    /// Bracket of `victim_age`.
    pub age_bracket: AgeBracket,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn seasons_partition_all_months() {
        for month in 1..=12u32 {
            let owners: Vec<Season> = Season::all()
                .iter()
                .copied()
                .filter(|s| s.months().contains(&month))
                .collect();
            assert_eq!(owners.len(), 1, "month {month} owned by {owners:?}");
            assert_eq!(Season::from_month(month).unwrap(), owners[0]);
        }
    }

    #[test]
    fn season_of_date_matches_season_of_month() {
        for month in 1..=12u32 {
            for day in [1, 28] {
                let date = NaiveDate::from_ymd_opt(2022, month, day).unwrap();
                assert_eq!(Season::from_date(date), Season::from_month(month).unwrap());
            }
        }
        let new_years_eve = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        assert_eq!(Season::from_date(new_years_eve), Season::Fall);
    }

    #[test]
    fn seasons_are_three_consecutive_months() {
        let mut next = 1;
        for season in Season::all() {
            let months = season.months();
            assert_eq!(*months.start(), next);
            assert_eq!(months.end() - months.start(), 2);
            next = months.end() + 1;
        }
        assert_eq!(next, 13);
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert_eq!(Season::from_month(0), Err(InvalidMonthError { month: 0 }));
        assert!(Season::from_month(13).is_err());
    }

    #[test]
    fn brackets_edges() {
        assert_eq!(AgeBracket::from_age(Some(19)), AgeBracket::Unbracketed);
        assert_eq!(AgeBracket::from_age(Some(20)), AgeBracket::Twenties);
        assert_eq!(AgeBracket::from_age(Some(29)), AgeBracket::Twenties);
        assert_eq!(AgeBracket::from_age(Some(30)), AgeBracket::Thirties);
        assert_eq!(AgeBracket::from_age(Some(49)), AgeBracket::Forties);
        assert_eq!(AgeBracket::from_age(Some(59)), AgeBracket::Fifties);
        assert_eq!(AgeBracket::from_age(Some(60)), AgeBracket::Unbracketed);
        assert_eq!(AgeBracket::from_age(Some(-1)), AgeBracket::Unbracketed);
        assert_eq!(AgeBracket::from_age(None), AgeBracket::Unbracketed);
    }

    #[test]
    fn bracket_ranges_match_classification() {
        for bracket in AgeBracket::bracketed() {
            for age in bracket.ages().unwrap() {
                assert_eq!(AgeBracket::from_age(Some(age)), *bracket);
            }
        }
        assert!(AgeBracket::Unbracketed.ages().is_none());
        assert!(!AgeBracket::Unbracketed.is_bracketed());
    }

    #[test]
    fn display_and_parse_labels() {
        assert_eq!(Season::Winter.to_string(), "winter");
        assert_eq!(Season::from_str("fall").unwrap(), Season::Fall);
        assert_eq!(AgeBracket::Thirties.to_string(), "30-39");
        assert_eq!(AgeBracket::from_str("50-59").unwrap(), AgeBracket::Fifties);
    }
}
