//! Filtered views of the permission tree.
//!
//! A [`Query`] narrows a built tree to one module and/or to permissions whose
//! text matches a search string. The source tree is never touched; each call
//! returns a fresh tree with empty categories and modules pruned.

use crate::{CanonicalPermission, Category, ModuleGroup};

bitflags::bitflags! {
    /// Permission fields consulted by text search.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SearchFields: u8 {
        const NAME        = 1 << 0;
        const CODE        = 1 << 1;
        const DESCRIPTION = 1 << 2;
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        SearchFields::all()
    }
}

/// UI-owned view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Free text; blank means no text filter.
    pub search: String,
    /// Exact module key; `None` or blank means every module.
    pub module: Option<String>,
    pub fields: SearchFields,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn fields(mut self, fields: SearchFields) -> Self {
        self.fields = fields;
        self
    }

    /// True when the query restricts nothing.
    pub fn is_unrestricted(&self) -> bool {
        self.selected_module().is_none() && self.needle().is_none()
    }

    fn selected_module(&self) -> Option<&str> {
        self.module.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    fn needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_lowercase()) }
    }
}

pub(crate) fn filter_tree(tree: &[ModuleGroup], query: &Query) -> Vec<ModuleGroup> {
    let selected = query.selected_module();
    let needle = query.needle();

    tree.iter()
        .filter(|group| selected.is_none_or(|m| group.module == m))
        .filter_map(|group| match &needle {
            None => Some(group.clone()),
            Some(needle) => filter_group(group, needle, query.fields),
        })
        .collect()
}

fn filter_group(group: &ModuleGroup, needle: &str, fields: SearchFields) -> Option<ModuleGroup> {
    let categories: Vec<Category> = group
        .categories
        .iter()
        .filter_map(|category| {
            let permissions: Vec<CanonicalPermission> =
                category.permissions.iter().filter(|p| matches(p, needle, fields)).cloned().collect();
            if permissions.is_empty() {
                None
            } else {
                Some(Category {
                    category: category.category.clone(),
                    category_name: category.category_name.clone(),
                    permissions,
                })
            }
        })
        .collect();

    if categories.is_empty() {
        return None;
    }

    Some(ModuleGroup {
        module: group.module.clone(),
        module_name: group.module_name.clone(),
        module_order: group.module_order,
        categories,
    })
}

/// `needle` must already be trimmed and lower-cased.
fn matches(permission: &CanonicalPermission, needle: &str, fields: SearchFields) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    (fields.contains(SearchFields::NAME) && hit(&permission.name))
        || (fields.contains(SearchFields::CODE) && hit(&permission.code))
        || (fields.contains(SearchFields::DESCRIPTION) && permission.description.as_deref().is_some_and(hit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermissionRecord;

    fn perm(id: &str, code: &str, name: &str, description: Option<&str>) -> CanonicalPermission {
        let mut record = PermissionRecord::new(id, code, name);
        record.description = description.map(str::to_string);
        CanonicalPermission::new(record)
    }

    fn sample_tree() -> Vec<ModuleGroup> {
        vec![
            ModuleGroup {
                module: "aup".into(),
                module_name: "Animal Use Protocols".into(),
                module_order: 1,
                categories: vec![Category {
                    category: "protocol".into(),
                    category_name: "Protocols".into(),
                    permissions: vec![
                        perm("1", "aup.protocol.view", "View protocols", None),
                        perm("2", "aup.protocol.approve", "Approve protocols", Some("Final IACUC sign-off")),
                    ],
                }],
            },
            ModuleGroup {
                module: "erp".into(),
                module_name: "Inventory & ERP".into(),
                module_order: 3,
                categories: vec![
                    Category {
                        category: "stock".into(),
                        category_name: "Stock".into(),
                        permissions: vec![perm("3", "erp.stock.view", "View stock", None)],
                    },
                    Category {
                        category: "warehouse".into(),
                        category_name: "Warehouses".into(),
                        permissions: vec![perm("4", "erp.warehouse.edit", "Edit warehouses", Some("rename, relocate"))],
                    },
                ],
            },
        ]
    }

    fn ids(tree: &[ModuleGroup]) -> Vec<&str> {
        tree.iter().flat_map(ModuleGroup::permission_ids).collect()
    }

    #[test]
    fn unrestricted_query_returns_copy() {
        let tree = sample_tree();
        assert_eq!(filter_tree(&tree, &Query::new()), tree);
        assert_eq!(filter_tree(&tree, &Query::new().search(" \t ").module("  ")), tree);
    }

    #[test]
    fn module_selector_is_exact() {
        let tree = sample_tree();
        assert_eq!(ids(&filter_tree(&tree, &Query::new().module("erp"))), vec!["3", "4"]);
        assert!(filter_tree(&tree, &Query::new().module("er")).is_empty());
        assert!(filter_tree(&tree, &Query::new().module("hr")).is_empty());
    }

    #[test]
    fn search_matches_name_code_and_description() {
        let tree = sample_tree();
        assert_eq!(ids(&filter_tree(&tree, &Query::new().search("  VIEW "))), vec!["1", "3"]);
        assert_eq!(ids(&filter_tree(&tree, &Query::new().search("warehouse.edit"))), vec!["4"]);
        assert_eq!(ids(&filter_tree(&tree, &Query::new().search("iacuc"))), vec!["2"]);
    }

    #[test]
    fn search_prunes_empty_branches() {
        let tree = sample_tree();
        let filtered = filter_tree(&tree, &Query::new().search("relocate"));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].module, "erp");
        assert_eq!(filtered[0].categories.len(), 1);
        assert_eq!(filtered[0].categories[0].category, "warehouse");
    }

    #[test]
    fn module_and_search_compose() {
        let tree = sample_tree();
        assert_eq!(ids(&filter_tree(&tree, &Query::new().module("aup").search("view"))), vec!["1"]);
        assert!(filter_tree(&tree, &Query::new().module("aup").search("stock")).is_empty());
    }

    #[test]
    fn search_fields_restrict_matching() {
        let tree = sample_tree();
        let query = Query::new().search("iacuc").fields(SearchFields::NAME | SearchFields::CODE);
        assert!(filter_tree(&tree, &query).is_empty());

        let query = Query::new().search("aup.").fields(SearchFields::CODE);
        assert_eq!(ids(&filter_tree(&tree, &query)), vec!["1", "2"]);
    }

    #[test]
    fn source_tree_is_untouched() {
        let tree = sample_tree();
        let before = tree.clone();
        let _ = filter_tree(&tree, &Query::new().search("view").module("erp"));
        assert_eq!(tree, before);
    }
}
