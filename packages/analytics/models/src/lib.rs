#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for crime analytics.
//!
//! Defines the generic grouping/ranking/comparison results produced by the
//! analytics engine, plus one row type per analytical question.

use crime_stats_crime_models::{AgeBracket, Season};
use serde::{Deserialize, Serialize};

/// A column of a derived incident that rows can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupColumn {
    /// Report year.
    Year,
    /// Report month (1-12).
    Month,
    /// Report season.
    Season,
    /// Victim age bracket.
    AgeBracket,
    /// Offense description.
    CrimeDescription,
}

/// One value of a [`GroupKey`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    /// Report year.
    Year(i32),
    /// Report month.
    Month(u32),
    /// Report season.
    Season(Season),
    /// Victim age bracket.
    AgeBracket(AgeBracket),
    /// Offense description.
    CrimeDescription(String),
}

impl GroupValue {
    /// Returns the year if this is a [`GroupValue::Year`].
    #[must_use]
    pub const fn as_year(&self) -> Option<i32> {
        match self {
            Self::Year(y) => Some(*y),
            _ => None,
        }
    }

    /// Returns the season if this is a [`GroupValue::Season`].
    #[must_use]
    pub const fn as_season(&self) -> Option<Season> {
        match self {
            Self::Season(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns the bracket if this is a [`GroupValue::AgeBracket`].
    #[must_use]
    pub const fn as_age_bracket(&self) -> Option<AgeBracket> {
        match self {
            Self::AgeBracket(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the description if this is a [`GroupValue::CrimeDescription`].
    #[must_use]
    pub fn as_crime_description(&self) -> Option<&str> {
        match self {
            Self::CrimeDescription(d) => Some(d),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroupValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y}"),
            Self::Month(m) => write!(f, "{m}"),
            Self::Season(s) => write!(f, "{s}"),
            Self::AgeBracket(b) => write!(f, "{b}"),
            Self::CrimeDescription(d) => f.write_str(d),
        }
    }
}

/// Ordered tuple of grouping values, one per [`GroupColumn`] of the
/// grouping specification that produced it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<GroupValue>);

impl GroupKey {
    /// Returns the value at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&GroupValue> {
        self.0.get(position)
    }

    /// Returns a new key holding only the values at `positions`, in that
    /// order. Positions past the end are skipped.
    #[must_use]
    pub fn project(&self, positions: &[usize]) -> Self {
        Self(
            positions
                .iter()
                .filter_map(|&p| self.0.get(p).cloned())
                .collect(),
        )
    }

    /// Returns the values whose positions are not in `positions`.
    #[must_use]
    pub fn without(&self, positions: &[usize]) -> Self {
        Self(
            self.0
                .iter()
                .enumerate()
                .filter(|(i, _)| !positions.contains(i))
                .map(|(_, v)| v.clone())
                .collect(),
        )
    }
}

/// Number of incidents sharing one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Group key.
    pub key: GroupKey,
    /// Number of incidents with this key.
    pub count: u64,
}

/// An [`AggregationResult`] ranked within its partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Group key.
    pub key: GroupKey,
    /// Number of incidents with this key.
    pub count: u64,
    /// 1-based rank by descending count. Ties share a rank and leave a gap.
    pub rank: u32,
}

/// Year-over-year counts for one crime category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoyComparison {
    /// Crime category (offense description).
    pub category: String,
    /// Earlier year.
    pub base_year: i32,
    /// Later year.
    pub target_year: i32,
    /// Count in `base_year`.
    pub base_count: u64,
    /// Count in `target_year`.
    pub target_count: u64,
    /// `target_count - base_count`.
    pub absolute_delta: i64,
    /// `absolute_delta / base_count * 100`, rounded half away from zero to
    /// two decimals. `None` when `base_count` is zero.
    pub percentage_delta: Option<f64>,
}

/// How to treat a category that only appears in one of the compared years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCategoryPolicy {
    /// Keep the category and count the missing year as zero.
    #[default]
    TreatAsZero,
    /// Drop the category (inner join).
    Exclude,
}

/// Earliest and latest report year in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Earliest report year.
    pub earliest_year: i32,
    /// Latest report year.
    pub latest_year: i32,
}

/// Total incidents in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCount {
    /// Report year.
    pub year: i32,
    /// Incident count.
    pub count: u64,
}

/// Answer to "what date range does the data cover".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeResult {
    /// `None` when there are no incidents.
    pub range: Option<DateRange>,
    /// Totals per year, ascending.
    pub by_year: Vec<YearCount>,
}

/// Absolute change in one crime's count between two years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncreaseRow {
    /// Offense description.
    pub crime_description: String,
    /// Earlier year.
    pub base_year: i32,
    /// Later year.
    pub target_year: i32,
    /// Count in `base_year`.
    pub base_count: u64,
    /// Count in `target_year`.
    pub target_count: u64,
    /// `target_count - base_count`.
    pub increase: i64,
}

/// Percentage change in one crime's count between two years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentageIncreaseRow {
    /// Offense description.
    pub crime_description: String,
    /// Earlier year.
    pub base_year: i32,
    /// Later year.
    pub target_year: i32,
    /// Count in `base_year`.
    pub base_count: u64,
    /// Count in `target_year`.
    pub target_count: u64,
    /// Percentage change rounded to two decimals. `None` when `base_count`
    /// is zero.
    pub percentage_increase: Option<f64>,
}

/// One of the top crimes for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRankRow {
    /// Report year.
    pub year: i32,
    /// Season.
    pub season: Season,
    /// Offense description.
    pub crime_description: String,
    /// Incident count.
    pub count: u64,
    /// Rank within the year and season.
    pub rank: u32,
}

/// One of the top crimes for a victim age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBracketRankRow {
    /// Report year.
    pub year: i32,
    /// Victim age bracket.
    pub age_bracket: AgeBracket,
    /// Offense description.
    pub crime_description: String,
    /// Incident count.
    pub count: u64,
    /// Rank within the year and bracket.
    pub rank: u32,
}

/// One of the top crimes for a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRankRow {
    /// Report year.
    pub year: i32,
    /// Offense description.
    pub crime_description: String,
    /// Incident count.
    pub count: u64,
    /// Rank within the year.
    pub rank: u32,
}

/// Answers to all six questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Date range and yearly totals.
    pub date_range: DateRangeResult,
    /// Absolute change per crime, largest increase first.
    pub increase: Vec<IncreaseRow>,
    /// Percentage change per crime, largest increase first.
    pub percentage_increase: Vec<PercentageIncreaseRow>,
    /// Top crimes per season.
    pub top_by_season: Vec<SeasonRankRow>,
    /// Top crimes per victim age bracket.
    pub top_by_age_bracket: Vec<AgeBracketRankRow>,
    /// Top crimes per year.
    pub top_by_year: Vec<YearRankRow>,
}

/// The analytical questions the engine answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    /// Range of report years and totals per year.
    DateRange,
    /// Largest absolute increase between two years.
    Increase,
    /// Largest percentage increase between two years.
    PercentageIncrease,
    /// Top crimes per season.
    TopBySeason,
    /// Top crimes per victim age bracket.
    TopByAgeBracket,
    /// Top crimes per year.
    TopByYear,
}

impl Question {
    /// Returns all questions in report order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::DateRange,
            Self::Increase,
            Self::PercentageIncrease,
            Self::TopBySeason,
            Self::TopByAgeBracket,
            Self::TopByYear,
        ]
    }

    /// Human-readable heading for report output.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::DateRange => "Date range reported",
            Self::Increase => "Largest increase in crimes",
            Self::PercentageIncrease => "Largest percentage increase in crimes",
            Self::TopBySeason => "Top crimes by season",
            Self::TopByAgeBracket => "Top crimes by victim age bracket",
            Self::TopByYear => "Top crimes by year",
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateRange => write!(f, "date_range"),
            Self::Increase => write!(f, "increase"),
            Self::PercentageIncrease => write!(f, "percentage_increase"),
            Self::TopBySeason => write!(f, "top_by_season"),
            Self::TopByAgeBracket => write!(f, "top_by_age_bracket"),
            Self::TopByYear => write!(f, "top_by_year"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> GroupKey {
        GroupKey(vec![
            GroupValue::Year(2022),
            GroupValue::Season(Season::Spring),
            GroupValue::CrimeDescription("ARSON".to_string()),
        ])
    }

    #[test]
    fn project_selects_positions_in_order() {
        let projected = key().project(&[2, 0]);
        assert_eq!(
            projected,
            GroupKey(vec![
                GroupValue::CrimeDescription("ARSON".to_string()),
                GroupValue::Year(2022),
            ])
        );
    }

    #[test]
    fn without_drops_positions() {
        assert_eq!(
            key().without(&[0, 1]),
            GroupKey(vec![GroupValue::CrimeDescription("ARSON".to_string())])
        );
    }

    #[test]
    fn key_serializes_as_plain_values() {
        let json = serde_json::to_string(&key()).unwrap();
        assert_eq!(json, r#"[2022,"spring","ARSON"]"#);
    }

    #[test]
    fn question_names_are_unique() {
        let mut names: Vec<String> = Question::all().iter().map(ToString::to_string).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Question::all().len());
    }
}
