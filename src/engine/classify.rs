//! Module/category classification.
//!
//! ```text
//! module:   explicit tag (after legacy remap)
//!           └─▶ first code segment via prefix table
//!               └─▶ catch-all module
//! category: second code segment
//!           └─▶ catch-all category
//! ```
//!
//! Both lookups are total. Blank tags and blank segments count as missing.

use crate::{CanonicalPermission, Catalog, PermissionRecord};

/// A canonical permission paired with its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Classified {
    pub permission: CanonicalPermission,
    pub module: String,
    pub category: String,
}

pub(crate) fn classify_all(catalog: &Catalog, canonical: Vec<CanonicalPermission>) -> Vec<Classified> {
    canonical
        .into_iter()
        .map(|permission| {
            let module = resolve_module(catalog, &permission).to_string();
            let category = resolve_category(catalog, &permission).to_string();
            Classified { permission, module, category }
        })
        .collect()
}

pub(crate) fn resolve_module<'a>(catalog: &'a Catalog, record: &'a PermissionRecord) -> &'a str {
    if let Some(module) = record.module.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        return catalog.remap_module(module);
    }

    segment(&record.code, 0)
        .and_then(|prefix| catalog.module_for_prefix(prefix))
        .unwrap_or(catalog.fallback_module.as_str())
}

pub(crate) fn resolve_category<'a>(catalog: &'a Catalog, record: &'a PermissionRecord) -> &'a str {
    segment(&record.code, 1).unwrap_or(catalog.fallback_category.as_str())
}

fn segment(code: &str, index: usize) -> Option<&str> {
    code.split('.').nth(index).filter(|s| !s.is_empty())
}
