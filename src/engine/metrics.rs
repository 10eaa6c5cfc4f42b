//! Engine run metrics.
//!
//! Every run records per-stage wall time. The numbers are cheap to collect
//! (one `Instant` per stage) and are surfaced through
//! [`resolve_verbose_with`](crate::resolve_verbose_with) and the CLI report.

use super::dedup::DedupReport;
use crate::{ModuleGroup, Stats};
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for [`Engine::run`](super::Engine::run).
    pub total: Duration,
    pub dedup: Duration,
    pub classify: Duration,
    pub build: Duration,
    pub filter: Duration,
    pub stats: Duration,
}

/// Engine output bundled with diagnostics.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Unfiltered tree.
    pub tree: Vec<ModuleGroup>,
    /// Tree restricted by the run's query.
    pub filtered: Vec<ModuleGroup>,
    pub stats: Stats,
    pub dedup: DedupReport,
    pub metrics: RunMetrics,
}
