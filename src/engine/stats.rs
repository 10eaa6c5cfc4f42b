//! Inventory counts.
//!
//! Counts are taken over the canonical set, never over a filtered tree, so a
//! caller can show "X of Y" while a search is active.

use super::classify::Classified;
use crate::Stats;

pub(crate) fn aggregate(classified: &[Classified]) -> Stats {
    let mut stats = Stats { total: classified.len(), ..Stats::default() };
    for entry in classified {
        *stats.module_counts.entry(entry.module.clone()).or_insert(0) += 1;
    }
    stats
}
