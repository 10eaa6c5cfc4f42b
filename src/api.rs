use crate::engine::{self, DedupReport, Engine, Query, RunMetrics};
use crate::{Catalog, ModuleGroup, PermissionRecord, Stats};
use serde::Serialize;

/// One entry of a module selector, in tree order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOption {
    pub module: String,
    pub module_name: String,
    /// Canonical permissions in the module, independent of any filter.
    pub count: usize,
}

/// Result from [`resolve`] and [`resolve_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    /// Every canonical permission, grouped and sorted.
    pub tree: Vec<ModuleGroup>,
    /// `tree` restricted by the query.
    pub filtered: Vec<ModuleGroup>,
    /// Counts over `tree`, never over `filtered`.
    pub stats: Stats,
    pub module_options: Vec<ModuleOption>,
}

impl Taxonomy {
    /// Re-filter the unfiltered tree with another query.
    pub fn view(&self, query: &Query) -> Vec<ModuleGroup> {
        engine::filter_view(&self.tree, query)
    }

    /// Number of permissions in the filtered view.
    pub fn visible_count(&self) -> usize {
        self.filtered.iter().map(ModuleGroup::permission_count).sum()
    }
}

/// Additional details returned by [`resolve_verbose_with`].
#[derive(Debug, Clone)]
pub struct ResolveDetails {
    pub dedup: DedupReport,
    pub metrics: RunMetrics,
    /// `version` of the catalog the run used.
    pub catalog_version: u32,
}

#[derive(Debug, Clone)]
pub struct TaxonomyVerbose {
    pub taxonomy: Taxonomy,
    pub details: ResolveDetails,
}

/// Resolve `records` with the built-in catalog and no filter.
///
/// # Example
/// ```
/// use permtax::{PermissionRecord, resolve};
///
/// let records = vec![
///     PermissionRecord::new("1", "animal.record.view", "View animal records"),
///     PermissionRecord::new("2", "pig.record.view", "View pig records"),
/// ];
/// let taxonomy = resolve(&records);
/// assert_eq!(taxonomy.stats.total, 1);
/// assert_eq!(taxonomy.tree[0].module, "pig");
/// ```
pub fn resolve(records: &[PermissionRecord]) -> Taxonomy {
    resolve_with(records, Catalog::builtin(), &Query::default())
}

/// Resolve `records` with the given catalog and view query.
pub fn resolve_with(records: &[PermissionRecord], catalog: &Catalog, query: &Query) -> Taxonomy {
    resolve_verbose_with(records, catalog, query).taxonomy
}

/// Like [`resolve_with`], plus deduplication counts and stage timings.
pub fn resolve_verbose_with(records: &[PermissionRecord], catalog: &Catalog, query: &Query) -> TaxonomyVerbose {
    let run = Engine::new(catalog).run(records, query);
    let module_options = module_options(&run.tree, &run.stats);

    TaxonomyVerbose {
        taxonomy: Taxonomy { tree: run.tree, filtered: run.filtered, stats: run.stats, module_options },
        details: ResolveDetails { dedup: run.dedup, metrics: run.metrics, catalog_version: catalog.version },
    }
}

/// Decode a permission list. A JSON `null` is an empty list.
pub fn parse_records(json: &str) -> Result<Vec<PermissionRecord>, serde_json::Error> {
    let records: Option<Vec<PermissionRecord>> = serde_json::from_str(json)?;
    Ok(records.unwrap_or_default())
}

fn module_options(tree: &[ModuleGroup], stats: &Stats) -> Vec<ModuleOption> {
    tree.iter()
        .map(|group| ModuleOption {
            module: group.module.clone(),
            module_name: group.module_name.clone(),
            count: stats.module_counts.get(&group.module).copied().unwrap_or(0),
        })
        .collect()
}
