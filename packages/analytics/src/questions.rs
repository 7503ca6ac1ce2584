//! The six analytical questions.
//!
//! Each function takes the derived incident table explicitly and composes
//! the aggregation, ranking and comparison stages into one typed answer.

use crime_stats_analytics_models::{
    AgeBracketRankRow, DateRange, DateRangeResult, GroupColumn, IncreaseRow, MissingCategoryPolicy,
    PercentageIncreaseRow, RankedResult, Report, SeasonRankRow, YearCount, YearRankRow,
    YoyComparison,
};
use crime_stats_crime_models::DerivedIncident;

use crate::AnalyticsError;
use crate::aggregate::{aggregate, aggregate_filtered};
use crate::compare::compare_years;
use crate::config::AnalysisConfig;
use crate::rank::rank_top_n;

/// Total incidents per report year, ascending by year.
#[must_use]
pub fn yearly_totals(rows: &[DerivedIncident]) -> Vec<YearCount> {
    aggregate(rows, &[GroupColumn::Year])
        .into_iter()
        .filter_map(|r| {
            Some(YearCount {
                year: r.key.get(0)?.as_year()?,
                count: r.count,
            })
        })
        .collect()
}

/// Earliest and latest report year, plus totals per year.
#[must_use]
pub fn date_range(rows: &[DerivedIncident]) -> DateRangeResult {
    let by_year = yearly_totals(rows);
    let range = match (by_year.first(), by_year.last()) {
        (Some(first), Some(last)) => Some(DateRange {
            earliest_year: first.year,
            latest_year: last.year,
        }),
        _ => None,
    };
    DateRangeResult { range, by_year }
}

fn compare_crimes(
    rows: &[DerivedIncident],
    base_year: i32,
    target_year: i32,
    policy: MissingCategoryPolicy,
) -> Result<Vec<YoyComparison>, AnalyticsError> {
    let by_crime = [GroupColumn::CrimeDescription];
    let base = aggregate_filtered(rows, |r| r.year == base_year, &by_crime);
    let target = aggregate_filtered(rows, |r| r.year == target_year, &by_crime);
    compare_years(base_year, &base, target_year, &target, policy)
}

/// Change in each crime's count from `base_year` to `target_year`, largest
/// increase first.
///
/// # Errors
///
/// Returns [`AnalyticsError::SameYear`] if the years are equal.
pub fn increase_between(
    rows: &[DerivedIncident],
    base_year: i32,
    target_year: i32,
    policy: MissingCategoryPolicy,
) -> Result<Vec<IncreaseRow>, AnalyticsError> {
    Ok(compare_crimes(rows, base_year, target_year, policy)?
        .into_iter()
        .map(|c| IncreaseRow {
            crime_description: c.category,
            base_year: c.base_year,
            target_year: c.target_year,
            base_count: c.base_count,
            target_count: c.target_count,
            increase: c.absolute_delta,
        })
        .collect())
}

/// Percentage change in each crime's count from `base_year` to
/// `target_year`, largest increase first.
///
/// Crimes with no reports in `base_year` have no defined percentage; they
/// are kept with `None` and sorted last.
///
/// # Errors
///
/// Returns [`AnalyticsError::SameYear`] if the years are equal.
pub fn percentage_increase_between(
    rows: &[DerivedIncident],
    base_year: i32,
    target_year: i32,
    policy: MissingCategoryPolicy,
) -> Result<Vec<PercentageIncreaseRow>, AnalyticsError> {
    let mut out: Vec<PercentageIncreaseRow> = compare_crimes(rows, base_year, target_year, policy)?
        .into_iter()
        .map(|c| {
            if c.percentage_delta.is_none() {
                log::debug!(
                    "No percentage change for '{}': no reports in {}",
                    c.category,
                    c.base_year
                );
            }
            PercentageIncreaseRow {
                crime_description: c.category,
                base_year: c.base_year,
                target_year: c.target_year,
                base_count: c.base_count,
                target_count: c.target_count,
                percentage_increase: c.percentage_delta,
            }
        })
        .collect();

    out.sort_by(|a, b| match (a.percentage_increase, b.percentage_increase) {
        (Some(x), Some(y)) => y
            .total_cmp(&x)
            .then_with(|| a.crime_description.cmp(&b.crime_description)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.crime_description.cmp(&b.crime_description),
    });

    Ok(out)
}

fn season_row(r: RankedResult) -> Option<SeasonRankRow> {
    Some(SeasonRankRow {
        year: r.key.get(0)?.as_year()?,
        season: r.key.get(1)?.as_season()?,
        crime_description: r.key.get(2)?.as_crime_description()?.to_string(),
        count: r.count,
        rank: r.rank,
    })
}

/// Top `n` crimes per season of `year`.
#[must_use]
pub fn top_crimes_by_season(rows: &[DerivedIncident], year: i32, n: u32) -> Vec<SeasonRankRow> {
    let counts = aggregate_filtered(
        rows,
        |r| r.year == year,
        &[
            GroupColumn::Year,
            GroupColumn::Season,
            GroupColumn::CrimeDescription,
        ],
    );
    rank_top_n(counts, &[0, 1], n)
        .into_iter()
        .filter_map(season_row)
        .collect()
}

fn age_bracket_row(r: RankedResult) -> Option<AgeBracketRankRow> {
    Some(AgeBracketRankRow {
        year: r.key.get(0)?.as_year()?,
        age_bracket: r.key.get(1)?.as_age_bracket()?,
        crime_description: r.key.get(2)?.as_crime_description()?.to_string(),
        count: r.count,
        rank: r.rank,
    })
}

/// Top `n` crimes per victim age bracket in `year`. Incidents without a
/// bracket are left out.
#[must_use]
pub fn top_crimes_by_age_bracket(
    rows: &[DerivedIncident],
    year: i32,
    n: u32,
) -> Vec<AgeBracketRankRow> {
    let counts = aggregate_filtered(
        rows,
        |r| r.year == year && r.age_bracket.is_bracketed(),
        &[
            GroupColumn::Year,
            GroupColumn::AgeBracket,
            GroupColumn::CrimeDescription,
        ],
    );
    rank_top_n(counts, &[0, 1], n)
        .into_iter()
        .filter_map(age_bracket_row)
        .collect()
}

fn year_row(r: RankedResult) -> Option<YearRankRow> {
    Some(YearRankRow {
        year: r.key.get(0)?.as_year()?,
        crime_description: r.key.get(1)?.as_crime_description()?.to_string(),
        count: r.count,
        rank: r.rank,
    })
}

/// Top `n` crimes for each year from `from_year` to `to_year` inclusive.
#[must_use]
pub fn top_crimes_by_year(
    rows: &[DerivedIncident],
    from_year: i32,
    to_year: i32,
    n: u32,
) -> Vec<YearRankRow> {
    let counts = aggregate_filtered(
        rows,
        |r| (from_year..=to_year).contains(&r.year),
        &[GroupColumn::Year, GroupColumn::CrimeDescription],
    );
    rank_top_n(counts, &[0], n)
        .into_iter()
        .filter_map(year_row)
        .collect()
}

/// Answers all six questions with the given parameters.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if `config` is invalid.
pub fn run_report(
    rows: &[DerivedIncident],
    config: &AnalysisConfig,
) -> Result<Report, AnalyticsError> {
    config.validate()?;

    let cmp = config.comparison;
    let report = Report {
        date_range: date_range(rows),
        increase: increase_between(rows, cmp.base_year, cmp.target_year, cmp.missing_category)?,
        percentage_increase: percentage_increase_between(
            rows,
            cmp.base_year,
            cmp.target_year,
            cmp.missing_category,
        )?,
        top_by_season: top_crimes_by_season(rows, config.season_ranking.year, config.top_n),
        top_by_age_bracket: top_crimes_by_age_bracket(rows, config.age_ranking.year, config.top_n),
        top_by_year: top_crimes_by_year(
            rows,
            config.year_ranking.from_year,
            config.year_ranking.to_year,
            config.top_n,
        ),
    };

    log::info!(
        "Report over {} incidents: {} season rows, {} age bracket rows, {} year rows",
        rows.len(),
        report.top_by_season.len(),
        report.top_by_age_bracket.len(),
        report.top_by_year.len()
    );

    Ok(report)
}
