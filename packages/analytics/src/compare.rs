//! Year-over-year comparison of per-category counts.

use std::collections::{BTreeMap, BTreeSet};

use crime_stats_analytics_models::{AggregationResult, MissingCategoryPolicy, YoyComparison};

use crate::AnalyticsError;

/// Collects `category -> count` from aggregation results whose key holds a
/// crime description. Rows without one are ignored.
#[must_use]
pub fn category_counts(results: &[AggregationResult]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for result in results {
        if let Some(category) = result.key.0.iter().find_map(|v| v.as_crime_description()) {
            *counts.entry(category.to_string()).or_insert(0) += result.count;
        }
    }
    counts
}

fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Compares per-category counts between two years.
///
/// `base` and `target` are aggregations keyed by crime description for
/// `base_year` and `target_year`. Categories present in only one year are
/// handled per `policy`. Rows are ordered by absolute delta, largest
/// increase first, then by category.
///
/// # Errors
///
/// Returns [`AnalyticsError::SameYear`] if both years are equal.
pub fn compare_years(
    base_year: i32,
    base: &[AggregationResult],
    target_year: i32,
    target: &[AggregationResult],
    policy: MissingCategoryPolicy,
) -> Result<Vec<YoyComparison>, AnalyticsError> {
    if base_year == target_year {
        return Err(AnalyticsError::SameYear { year: base_year });
    }

    let base_counts = category_counts(base);
    let target_counts = category_counts(target);

    let categories: BTreeSet<&String> = match policy {
        MissingCategoryPolicy::TreatAsZero => base_counts.keys().chain(target_counts.keys()).collect(),
        MissingCategoryPolicy::Exclude => base_counts
            .keys()
            .filter(|c| target_counts.contains_key(*c))
            .collect(),
    };

    let mut comparisons: Vec<YoyComparison> = categories
        .into_iter()
        .map(|category| {
            let base_count = base_counts.get(category).copied().unwrap_or(0);
            let target_count = target_counts.get(category).copied().unwrap_or(0);
            let mut comparison = YoyComparison {
                category: category.clone(),
                base_year,
                target_year,
                base_count,
                target_count,
                absolute_delta: signed(target_count).saturating_sub(signed(base_count)),
                percentage_delta: None,
            };
            comparison.percentage_delta = percentage_delta(&comparison).ok();
            comparison
        })
        .collect();

    comparisons.sort_by(|a, b| {
        b.absolute_delta
            .cmp(&a.absolute_delta)
            .then_with(|| a.category.cmp(&b.category))
    });

    log::debug!(
        "Compared {} categories between {base_year} and {target_year} ({policy:?})",
        comparisons.len()
    );

    Ok(comparisons)
}

/// Percentage change from base to target count, rounded to two decimals.
///
/// Rounding is decimal half away from zero on the exact ratio, computed in
/// integers (4000 to 4023 is 0.575% and rounds to 0.58), so binary
/// floating-point error never moves a result across a rounding boundary.
/// Only the final hundredths value is converted to `f64`.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionByZero`] if the base count is zero.
#[allow(clippy::cast_precision_loss)]
pub fn percentage_delta(comparison: &YoyComparison) -> Result<f64, AnalyticsError> {
    if comparison.base_count == 0 {
        return Err(AnalyticsError::DivisionByZero {
            category: comparison.category.clone(),
            base_year: comparison.base_year,
        });
    }

    // Hundredths of a percent: delta * 10_000 / base.
    let numerator = i128::from(comparison.absolute_delta) * 10_000;
    let denominator = i128::from(comparison.base_count);
    let magnitude = (2 * numerator.abs() + denominator) / (2 * denominator);
    let hundredths = if numerator < 0 { -magnitude } else { magnitude };

    Ok(hundredths as f64 / 100.0)
}
