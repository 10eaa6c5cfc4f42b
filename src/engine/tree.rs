//! Tree building.
//!
//! Groups classified permissions into `module -> category -> permissions` and
//! imposes the display order:
//!
//! - permissions by name,
//! - categories by resolved label,
//! - modules by configured order (catch-all last), then key.
//!
//! Grouping goes through ordered maps and every sort is stable, so the same
//! canonical input always yields the same tree.

use super::classify::Classified;
use super::naming::{module_label, module_order, resolve_category_label};
use crate::{CanonicalPermission, Catalog, Category, ModuleGroup};
use std::collections::BTreeMap;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub(crate) fn build_tree(catalog: &Catalog, classified: &[Classified]) -> Vec<ModuleGroup> {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<&CanonicalPermission>>> = BTreeMap::new();
    for entry in classified {
        grouped
            .entry(entry.module.as_str())
            .or_default()
            .entry(entry.category.as_str())
            .or_default()
            .push(&entry.permission);
    }

    let mut modules: Vec<ModuleGroup> = grouped
        .into_iter()
        .map(|(module, categories)| {
            let mut categories: Vec<Category> = categories
                .into_iter()
                .filter(|(_, permissions)| !permissions.is_empty())
                .map(|(category, permissions)| {
                    let (category_name, _) = resolve_category_label(catalog, module, category);
                    let mut permissions: Vec<CanonicalPermission> = permissions.into_iter().cloned().collect();
                    permissions.sort_by_cached_key(|p| CollationKey::new(&p.name));
                    Category { category: category.to_string(), category_name, permissions }
                })
                .collect();
            categories.sort_by_cached_key(|c| CollationKey::new(&c.category_name));

            ModuleGroup {
                module: module.to_string(),
                module_name: module_label(catalog, module).to_string(),
                module_order: module_order(catalog, module),
                categories,
            }
        })
        .filter(|m| !m.categories.is_empty())
        .collect();
    // Catch-all buckets go last even when the catalog orders them earlier.
    modules.sort_by_cached_key(|m| (is_catch_all(catalog, &m.module), m.module_order, m.module.clone()));

    debug!(modules = modules.len(), permissions = classified.len(), "built permission tree");
    modules
}

/// The catch-all itself, or an explicit module the catalog does not define.
fn is_catch_all(catalog: &Catalog, module: &str) -> bool {
    module == catalog.fallback_module || catalog.module_def(module).is_none()
}

/// Sort key approximating a locale-aware comparison.
///
/// Primary level ignores case and accents (`NFKD`, combining marks removed,
/// lower-cased); the raw string breaks ties so only identical strings compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct CollationKey {
    folded: String,
    raw: String,
}

impl CollationKey {
    pub(crate) fn new(s: &str) -> Self {
        let folded = s.nfkd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect();
        CollationKey { folded, raw: s.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::super::classify::classify_all;
    use super::super::dedup::deduplicate;
    use super::*;
    use crate::PermissionRecord;

    fn tree_of(records: &[PermissionRecord]) -> Vec<ModuleGroup> {
        let catalog = Catalog::builtin();
        let (canonical, _) = deduplicate(catalog, records);
        build_tree(catalog, &classify_all(catalog, canonical))
    }

    fn names(category: &Category) -> Vec<&str> {
        category.permissions.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn collation_ignores_case_and_accents() {
        let mut words = vec!["banana", "Éclair", "apple", "Apple", "eclair"];
        words.sort_by_cached_key(|w| CollationKey::new(w));
        assert_eq!(words, vec!["Apple", "apple", "banana", "eclair", "Éclair"]);
    }

    #[test]
    fn permissions_sort_by_name() {
        let tree = tree_of(&[
            PermissionRecord::new("1", "erp.stock.c", "delete stock"),
            PermissionRecord::new("2", "erp.stock.a", "Adjust stock"),
            PermissionRecord::new("3", "erp.stock.b", "create stock"),
        ]);

        assert_eq!(tree.len(), 1);
        assert_eq!(names(&tree[0].categories[0]), vec!["Adjust stock", "create stock", "delete stock"]);
    }

    #[test]
    fn equal_names_keep_input_order() {
        let tree = tree_of(&[
            PermissionRecord::new("b", "erp.stock.b", "Same"),
            PermissionRecord::new("a", "erp.stock.a", "Same"),
        ]);

        let ids: Vec<&str> = tree[0].categories[0].permission_ids();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn categories_sort_by_label_not_key() {
        // keys: warehouse (Warehouses), sku (SKU), product (Products)
        let tree = tree_of(&[
            PermissionRecord::new("1", "erp.warehouse.view", "w"),
            PermissionRecord::new("2", "erp.sku.view", "s"),
            PermissionRecord::new("3", "erp.product.view", "p"),
        ]);

        let labels: Vec<&str> = tree[0].categories.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(labels, vec!["Products", "SKU", "Warehouses"]);
    }

    #[test]
    fn modules_sort_by_configured_order() {
        let tree = tree_of(&[
            PermissionRecord::new("1", "dev.user.view", "u"),
            PermissionRecord::new("2", "zzz.thing", "z"),
            PermissionRecord::new("3", "erp.stock.view", "s"),
            PermissionRecord::new("4", "aup.protocol.view", "p"),
        ]);

        let modules: Vec<&str> = tree.iter().map(|m| m.module.as_str()).collect();
        assert_eq!(modules, vec!["aup", "erp", "dev", "other"]);
    }

    #[test]
    fn unknown_explicit_module_sorts_with_catch_all() {
        let tree = tree_of(&[
            PermissionRecord::new("1", "lab.bench.view", "b").with_module("lab"),
            PermissionRecord::new("2", "zzz.thing", "z"),
            PermissionRecord::new("3", "hr.leave.view", "l"),
        ]);

        let modules: Vec<(&str, &str, u32)> =
            tree.iter().map(|m| (m.module.as_str(), m.module_name.as_str(), m.module_order)).collect();
        assert_eq!(modules, vec![("hr", "Human Resources", 5), ("lab", "Other", 99), ("other", "Other", 99)]);
    }

    #[test]
    fn catch_all_sorts_last_with_unvalidated_order() {
        let mut catalog = Catalog::builtin().clone();
        for def in &mut catalog.modules {
            if def.key == "other" {
                def.order = 0;
            }
        }
        assert!(catalog.validate().is_err());

        let records = [
            PermissionRecord::new("1", "zzz.a", "a"),
            PermissionRecord::new("2", "lab.bench.view", "b").with_module("lab"),
            PermissionRecord::new("3", "erp.stock.view", "s"),
        ];
        let (canonical, _) = deduplicate(&catalog, &records);
        let tree = build_tree(&catalog, &classify_all(&catalog, canonical));

        let modules: Vec<(&str, u32)> = tree.iter().map(|m| (m.module.as_str(), m.module_order)).collect();
        assert_eq!(modules, vec![("erp", 3), ("lab", 0), ("other", 0)]);
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        assert!(tree_of(&[]).is_empty());
    }
}
