//! Built-in configuration tables.
//!
//! Every table here is plain constant data. `builtin()` assembles them into a
//! [`Catalog`], which is what the classifier and naming resolver consume; the
//! algorithms never reach into these constants directly, so a deployment can
//! replace any table by loading a catalog from JSON instead.
//!
//! Bump [`VERSION`] whenever a table changes in a way that moves permissions
//! between buckets or changes labels.

mod labels;
mod modules;
mod prefixes;

use crate::catalog::{Catalog, ModuleDef};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

pub(crate) const VERSION: u32 = 1;

static BUILTIN: Lazy<Catalog> = Lazy::new(assemble);

/// Shared instance of the built-in catalog.
pub(crate) fn builtin() -> &'static Catalog {
    &BUILTIN
}

fn assemble() -> Catalog {
    Catalog {
        version: VERSION,
        modules: modules::MODULES
            .iter()
            .map(|&(key, order, label)| ModuleDef { key: key.to_string(), order, label: label.to_string() })
            .collect(),
        fallback_module: modules::FALLBACK_MODULE.to_string(),
        fallback_category: labels::FALLBACK_CATEGORY.to_string(),
        module_remaps: to_map(prefixes::MODULE_REMAPS),
        prefix_modules: to_map(prefixes::PREFIX_MODULES),
        supersessions: to_map(prefixes::SUPERSESSIONS),
        category_labels: labels::CATEGORY_LABELS.iter().map(|&(module, table)| (module.to_string(), to_map(table))).collect(),
        operation_labels: to_map(labels::OPERATION_LABELS),
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|&(k, v)| (k.to_string(), v.to_string())).collect()
}
