//! Taxonomy resolution engine.
//!
//! This module turns a flat, possibly inconsistent permission list into a
//! canonical `module -> category -> permission` tree, a filtered view of that
//! tree, and inventory counts.
//!
//! ## How the parts work together
//!
//! ```text
//! Vec<PermissionRecord>
//!        │
//!        v
//! deduplicate (dedup.rs)          first id wins, code precedence, one bucket per id
//!        │
//!        v
//! classify_all (classify.rs)      (module, category) per canonical permission
//!        │
//!        ├──────────────────────────────┐
//!        v                              v
//! build_tree (tree.rs)             aggregate (stats.rs)
//!   + labels (naming.rs)             total + per-module counts
//!        │
//!        v
//! filter_tree (filter.rs)         module selector + text search
//! ```
//!
//! Every stage is a pure function over borrowed input that allocates its own
//! output. Nothing is cached between runs: a new permission list, query, or
//! module selection means a new [`Engine::run`].
//!
//! ## Responsibilities by module
//!
//! - `dedup.rs`: canonical code keys and the replacement precedence.
//! - `classify.rs`: explicit tag, prefix table, catch-all.
//! - `naming.rs`: module labels and the category label chain.
//! - `tree.rs`: grouping, collation, ordering, pruning.
//! - `filter.rs`: [`Query`] and the filtered view.
//! - `stats.rs`: counts over the canonical set.
//! - `metrics.rs`: per-stage timings.
//!
//! ## Debugging
//!
//! Stages emit `tracing` events at `debug`/`trace` level under the
//! `permtax::engine` target.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/filter.rs"]
mod filter;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/naming.rs"]
mod naming;
#[path = "engine/stats.rs"]
mod stats;
#[path = "engine/tree.rs"]
mod tree;


pub use dedup::DedupReport;
pub use filter::{Query, SearchFields};
pub use metrics::{RunMetrics, RunResult};
pub use naming::{CategoryLabelSource, format_code};

use crate::{Catalog, ModuleGroup, PermissionRecord};
use std::time::Instant;
use tracing::debug;

/// Runs the pipeline against one catalog.
///
/// Usage: create with `Engine::new(&catalog)` then call `run(records, query)`
/// as often as the inputs change.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'c> {
    catalog: &'c Catalog,
}

impl<'c> Engine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Engine { catalog }
    }

    pub fn run(&self, records: &[PermissionRecord], query: &Query) -> RunResult {
        let start = Instant::now();
        let mut metrics = RunMetrics::default();

        let t = Instant::now();
        let (canonical, dedup) = dedup::deduplicate(self.catalog, records);
        metrics.dedup = t.elapsed();

        let t = Instant::now();
        let classified = classify::classify_all(self.catalog, canonical);
        metrics.classify = t.elapsed();

        let t = Instant::now();
        let tree = tree::build_tree(self.catalog, &classified);
        metrics.build = t.elapsed();

        let t = Instant::now();
        let filtered = filter::filter_tree(&tree, query);
        metrics.filter = t.elapsed();

        let t = Instant::now();
        let stats = stats::aggregate(&classified);
        metrics.stats = t.elapsed();

        metrics.total = start.elapsed();
        debug!(
            canonical = stats.total,
            modules = tree.len(),
            visible_modules = filtered.len(),
            elapsed = ?metrics.total,
            "resolved permission taxonomy"
        );

        RunResult { tree, filtered, stats, dedup, metrics }
    }
}

/// Filter an already built tree without re-running the pipeline.
pub fn filter_view(tree: &[ModuleGroup], query: &Query) -> Vec<ModuleGroup> {
    filter::filter_tree(tree, query)
}
