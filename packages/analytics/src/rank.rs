//! Top-N ranking within partitions.
//!
//! Ranks use standard competition ranking: equal counts share a rank and the
//! next distinct count skips ahead by the number of tied rows
//! (10, 10, 7, 5 rank as 1, 1, 3, 4).

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crime_stats_analytics_models::{AggregationResult, GroupKey, RankedResult};

/// Number of rows kept per partition when no limit is configured.
pub const DEFAULT_TOP_N: u32 = 3;

/// Computes competition ranks for counts already sorted in descending order.
#[must_use]
pub fn competition_ranks(sorted_counts: &[u64]) -> Vec<u32> {
    let mut ranks: Vec<u32> = Vec::with_capacity(sorted_counts.len());

    for (i, &count) in sorted_counts.iter().enumerate() {
        let rank = match ranks.last() {
            Some(&prev) if i > 0 && sorted_counts[i - 1] == count => prev,
            _ => u32::try_from(i + 1).unwrap_or(u32::MAX),
        };
        ranks.push(rank);
    }

    ranks
}

/// Ranks aggregation results by descending count within each partition and
/// keeps rows ranked `n` or better.
///
/// `partition` lists the key positions that form the partition key. Every
/// row tied at a kept rank is kept, so a partition can return more than `n`
/// rows. Output is ordered by partition key, then rank, then the remaining
/// key values, which makes it identical for any ordering of `results`.
#[must_use]
pub fn rank_top_n(
    results: Vec<AggregationResult>,
    partition: &[usize],
    n: u32,
) -> Vec<RankedResult> {
    let mut partitions: BTreeMap<GroupKey, Vec<AggregationResult>> = BTreeMap::new();
    for result in results {
        partitions
            .entry(result.key.project(partition))
            .or_default()
            .push(result);
    }

    let mut ranked = Vec::new();

    for (partition_key, mut rows) in partitions {
        rows.sort_by_cached_key(|r| (Reverse(r.count), r.key.without(partition)));

        let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();
        let ranks = competition_ranks(&counts);

        let before = ranked.len();
        ranked.extend(
            rows.into_iter()
                .zip(ranks)
                .take_while(|(_, rank)| *rank <= n)
                .map(|(row, rank)| RankedResult {
                    key: row.key,
                    count: row.count,
                    rank,
                }),
        );

        log::trace!(
            "Partition {partition_key:?}: kept {} rows",
            ranked.len() - before
        );
    }

    ranked
}
