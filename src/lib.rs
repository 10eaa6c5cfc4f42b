extern crate self as permtax;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

#[macro_use]
mod macros;
mod api;
mod catalog;
mod engine;
mod expansion;
mod tables;

pub use api::{
    ModuleOption, ResolveDetails, Taxonomy, TaxonomyVerbose, parse_records, resolve, resolve_verbose_with,
    resolve_with,
};
pub use catalog::{Catalog, CatalogError, ModuleDef};
pub use engine::{
    CategoryLabelSource, DedupReport, Engine, Query, RunMetrics, RunResult, SearchFields, filter_view, format_code,
};
pub use expansion::{ExpansionSet, ExpansionState, category_key};

// --- Input ------------------------------------------------------------------

/// A raw permission record as issued by the permission source.
///
/// `code` is a dot-delimited path (`<prefix>.<category>[.<action>...]`). Both
/// `id` and the semantic meaning of `code` may repeat across records; the
/// engine collapses them into [`CanonicalPermission`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PermissionRecord {
    /// Convenience constructor for a record without module tag or description.
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), code: code.into(), name: name.into(), module: None, description: None }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// --- Output -----------------------------------------------------------------

/// The single surviving representative of a logical permission.
///
/// Only the deduplicator constructs these, so a slice of canonical permissions
/// never holds two entries with the same `id` or the same code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalPermission(PermissionRecord);

impl CanonicalPermission {
    pub(crate) fn new(record: PermissionRecord) -> Self {
        CanonicalPermission(record)
    }

    pub fn record(&self) -> &PermissionRecord {
        &self.0
    }

    pub fn into_record(self) -> PermissionRecord {
        self.0
    }
}

impl Deref for CanonicalPermission {
    type Target = PermissionRecord;

    fn deref(&self) -> &PermissionRecord {
        &self.0
    }
}

/// Second tree level: permissions sharing a `(module, category)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category: String,
    pub category_name: String,
    /// Sorted by name; never empty.
    pub permissions: Vec<CanonicalPermission>,
}

impl Category {
    /// Ids of every permission in this category, in display order.
    pub fn permission_ids(&self) -> Vec<&str> {
        self.permissions.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Top tree level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGroup {
    pub module: String,
    pub module_name: String,
    pub module_order: u32,
    /// Sorted by category label; never empty.
    pub categories: Vec<Category>,
}

impl ModuleGroup {
    /// Ids of every permission below this module, in display order.
    pub fn permission_ids(&self) -> Vec<&str> {
        self.categories.iter().flat_map(Category::permission_ids).collect()
    }

    pub fn permission_count(&self) -> usize {
        self.categories.iter().map(|c| c.permissions.len()).sum()
    }
}

/// Inventory counts over the canonical (unfiltered) permission set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub module_counts: BTreeMap<String, usize>,
}
