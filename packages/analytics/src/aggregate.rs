//! Category aggregation for the distribution charts.

use std::collections::BTreeMap;
use std::fmt::Display;

use incident_map_analytics_models::AggregatedStat;
use incident_map_incident_models::{IncidentRecord, RaceCode};

/// Groups `records` by `category_of` and computes count and percentage per
/// group.
///
/// `category_of` must be total: collapse missing or unrecognized values
/// into a single unknown category before returning so they land in one
/// bucket. The bucket label is the category's [`Display`] form.
///
/// Buckets are returned in first-seen order. The percentage denominator is
/// `records.len()`, unknown bucket included. Empty input yields an empty
/// list.
#[must_use]
pub fn aggregate<K, F>(records: &[IncidentRecord], category_of: F) -> Vec<AggregatedStat>
where
    K: Ord + Display,
    F: Fn(&IncidentRecord) -> K,
{
    if records.is_empty() {
        return Vec::new();
    }

    let mut index: BTreeMap<K, usize> = BTreeMap::new();
    let mut buckets: Vec<(String, u64)> = Vec::new();

    for record in records {
        let slot = *index.entry(category_of(record)).or_insert_with_key(|category| {
            buckets.push((category.to_string(), 0));
            buckets.len() - 1
        });
        buckets[slot].1 += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = records.len() as f64;

    buckets
        .into_iter()
        .map(|(label, count)| {
            #[allow(clippy::cast_precision_loss)]
            let percentage = count as f64 / total * 100.0;
            AggregatedStat {
                label,
                count,
                percentage,
            }
        })
        .collect()
}

/// Aggregates records by [`RaceCode`] label.
#[must_use]
pub fn aggregate_by_race(records: &[IncidentRecord]) -> Vec<AggregatedStat> {
    aggregate(records, IncidentRecord::race_code)
}

/// Orders stats by descending count, keeping first-seen order for ties.
pub fn sort_stats_by_count(stats: &mut [AggregatedStat]) {
    stats.sort_by(|a, b| b.count.cmp(&a.count));
}
