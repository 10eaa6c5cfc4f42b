//! Display labels for modules and categories.
//!
//! Category labels come from an ordered chain of sources; the first one that
//! produces a label wins:
//!
//! ```text
//! ModuleScoped ──▶ CrossModule ──▶ Operation ──▶ Formatted
//! (this module)    (any other)     (generic)     (from the raw key)
//! ```
//!
//! `Formatted` always answers, so the chain is total. Each source can also be
//! queried on its own through [`CategoryLabelSource::lookup`].

use crate::Catalog;
use serde::Serialize;

/// One level of the category label chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryLabelSource {
    /// The module's own category table.
    ModuleScoped,
    /// Another module's category table, searched in module order.
    CrossModule,
    /// The generic operation table (create, view, approve, ...).
    Operation,
    /// Mechanical formatting of the raw category key.
    Formatted,
}

impl CategoryLabelSource {
    pub const CHAIN: [CategoryLabelSource; 4] = [
        CategoryLabelSource::ModuleScoped,
        CategoryLabelSource::CrossModule,
        CategoryLabelSource::Operation,
        CategoryLabelSource::Formatted,
    ];

    pub fn lookup(self, catalog: &Catalog, module: &str, category: &str) -> Option<String> {
        match self {
            CategoryLabelSource::ModuleScoped => {
                catalog.category_labels.get(module).and_then(|table| table.get(category)).cloned()
            }
            CategoryLabelSource::CrossModule => catalog
                .label_table_order()
                .into_iter()
                .filter(|other| *other != module)
                .find_map(|other| catalog.category_labels.get(other).and_then(|table| table.get(category)))
                .cloned(),
            CategoryLabelSource::Operation => catalog.operation_labels.get(category).cloned(),
            CategoryLabelSource::Formatted => Some(format_code(category)),
        }
    }
}

pub(crate) fn module_label<'a>(catalog: &'a Catalog, module: &str) -> &'a str {
    catalog.module_def_or_fallback(module).1
}

pub(crate) fn module_order(catalog: &Catalog, module: &str) -> u32 {
    catalog.module_def_or_fallback(module).0
}

/// Walk the chain and report which source answered.
pub(crate) fn resolve_category_label(catalog: &Catalog, module: &str, category: &str) -> (String, CategoryLabelSource) {
    for source in CategoryLabelSource::CHAIN {
        if let Some(label) = source.lookup(catalog, module, category) {
            return (label, source);
        }
    }
    (category.to_string(), CategoryLabelSource::Formatted)
}

/// Turn a raw key like `stock_transfer` or `stockTransfer` into `Stock Transfer`.
///
/// Returns `raw` unchanged when formatting leaves nothing (e.g. `"__"`).
pub fn format_code(raw: &str) -> String {
    let spaced = regex!(r"([\p{Ll}0-9])(\p{Lu})").replace_all(raw, "$1 $2");
    let words: Vec<String> =
        spaced.split(|c: char| c == '_' || c.is_whitespace()).filter(|w| !w.is_empty()).map(capitalize).collect();

    if words.is_empty() { raw.to_string() } else { words.join(" ") }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_scoped_label_comes_first() {
        let (label, source) = resolve_category_label(Catalog::builtin(), "pig", "export");
        assert_eq!(label, "Data Export");
        assert_eq!(source, CategoryLabelSource::ModuleScoped);
    }

    #[test]
    fn other_modules_are_searched_before_operations() {
        // erp has no `export` entry, pig does.
        let (label, source) = resolve_category_label(Catalog::builtin(), "erp", "export");
        assert_eq!(label, "Data Export");
        assert_eq!(source, CategoryLabelSource::CrossModule);

        let (label, source) = resolve_category_label(Catalog::builtin(), "hr", "warehouse");
        assert_eq!(label, "Warehouses");
        assert_eq!(source, CategoryLabelSource::CrossModule);
    }

    #[test]
    fn operation_table_covers_actions() {
        let (label, source) = resolve_category_label(Catalog::builtin(), "erp", "approve");
        assert_eq!(label, "Approve");
        assert_eq!(source, CategoryLabelSource::Operation);
    }

    #[test]
    fn unknown_category_is_formatted() {
        let (label, source) = resolve_category_label(Catalog::builtin(), "other", "thing");
        assert_eq!(label, "Thing");
        assert_eq!(source, CategoryLabelSource::Formatted);
    }

    #[test]
    fn each_level_is_queryable_alone() {
        let catalog = Catalog::builtin();
        assert_eq!(CategoryLabelSource::ModuleScoped.lookup(catalog, "erp", "export"), None);
        assert_eq!(CategoryLabelSource::Operation.lookup(catalog, "erp", "export").as_deref(), Some("Export"));
        assert_eq!(CategoryLabelSource::Formatted.lookup(catalog, "erp", "export").as_deref(), Some("Export"));
    }

    #[test]
    fn format_code_splits_underscores_and_camel_case() {
        assert_eq!(format_code("stock_transfer"), "Stock Transfer");
        assert_eq!(format_code("stockTransfer"), "Stock Transfer");
        assert_eq!(format_code("batch2Label"), "Batch2 Label");
        assert_eq!(format_code("thing"), "Thing");
        assert_eq!(format_code("ALL"), "ALL");
    }

    #[test]
    fn format_code_falls_back_to_raw() {
        assert_eq!(format_code("__"), "__");
        assert_eq!(format_code(""), "");
    }

    #[test]
    fn unknown_module_uses_catch_all_label_and_order() {
        let catalog = Catalog::builtin();
        assert_eq!(module_label(catalog, "lab"), "Other");
        assert_eq!(module_order(catalog, "lab"), 99);
        assert_eq!(module_label(catalog, "erp"), "Inventory & ERP");
        assert_eq!(module_order(catalog, "erp"), 3);
    }
}
