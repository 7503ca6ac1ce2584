//! Grouping and counting of derived incidents.
//!
//! Results come out ordered by group key, so the same multiset of input rows
//! always produces the same output regardless of row order.

use std::collections::BTreeMap;

use crime_stats_analytics_models::{AggregationResult, GroupColumn, GroupKey, GroupValue};
use crime_stats_crime_models::DerivedIncident;

/// Reads one grouping column from a row.
#[must_use]
pub fn select_value(column: GroupColumn, row: &DerivedIncident) -> GroupValue {
    match column {
        GroupColumn::Year => GroupValue::Year(row.year),
        GroupColumn::Month => GroupValue::Month(row.month),
        GroupColumn::Season => GroupValue::Season(row.season),
        GroupColumn::AgeBracket => GroupValue::AgeBracket(row.age_bracket),
        GroupColumn::CrimeDescription => GroupValue::CrimeDescription(row.crime_description.clone()),
    }
}

/// Builds the group key of a row for the given column specification.
#[must_use]
pub fn group_key(columns: &[GroupColumn], row: &DerivedIncident) -> GroupKey {
    GroupKey(columns.iter().map(|&c| select_value(c, row)).collect())
}

/// Counts rows per distinct key of `columns`.
///
/// Only key combinations that occur in `rows` are returned.
pub fn aggregate<'a, I>(rows: I, columns: &[GroupColumn]) -> Vec<AggregationResult>
where
    I: IntoIterator<Item = &'a DerivedIncident>,
{
    let mut counts: BTreeMap<GroupKey, u64> = BTreeMap::new();
    for row in rows {
        *counts.entry(group_key(columns, row)).or_insert(0) += 1;
    }

    log::debug!("Aggregated {} groups over {columns:?}", counts.len());

    counts
        .into_iter()
        .map(|(key, count)| AggregationResult { key, count })
        .collect()
}

/// Like [`aggregate`], counting only rows accepted by `predicate`.
pub fn aggregate_filtered<'a, I, F>(
    rows: I,
    predicate: F,
    columns: &[GroupColumn],
) -> Vec<AggregationResult>
where
    I: IntoIterator<Item = &'a DerivedIncident>,
    F: Fn(&DerivedIncident) -> bool,
{
    aggregate(rows.into_iter().filter(|&row| predicate(row)), columns)
}
