//! Classification and naming configuration.
//!
//! A [`Catalog`] is the immutable data the engine consults: which modules
//! exist (and in what order), how code prefixes and legacy module tags map to
//! modules, and which labels to show. The algorithms in `engine/` only read
//! from a catalog, so extending the taxonomy means editing data, not code.
//!
//! The built-in tables live in `src/tables/`. A JSON document can override any
//! subset of fields; anything it omits keeps the built-in value.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catch-all module '{0}' is not defined")]
    MissingCatchAll(String),
    #[error("catch-all module '{module}' (order {order}) must sort after '{other}' (order {other_order})")]
    CatchAllNotLast { module: String, order: u32, other: String, other_order: u32 },
    #[error("module '{0}' is defined more than once")]
    DuplicateModule(String),
    #[error("supersession chain starting at prefix '{0}' loops back on itself")]
    SupersessionCycle(String),
    #[error("blank {0} in catalog")]
    BlankEntry(&'static str),
}

/// One configured top-level module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub key: String,
    pub order: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    /// Revision of the tables, bumped when buckets or labels move. The engine
    /// never interprets it; the CLI report shows it.
    pub version: u32,
    pub modules: Vec<ModuleDef>,
    /// Module used when nothing else matches.
    pub fallback_module: String,
    /// Category used when a code has fewer than two segments.
    pub fallback_category: String,
    /// Explicit module tag -> module it was folded into.
    pub module_remaps: BTreeMap<String, String>,
    /// First code segment -> module.
    pub prefix_modules: BTreeMap<String, String>,
    /// Legacy code prefix -> newer code prefix. Chains resolve to their last
    /// link, so `animal -> swine -> pig` makes `pig` current for both.
    pub supersessions: BTreeMap<String, String>,
    /// Module -> (category -> label).
    pub category_labels: BTreeMap<String, BTreeMap<String, String>>,
    /// Action-like category -> label, shared by every module.
    pub operation_labels: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin().clone()
    }
}

impl Catalog {
    /// The built-in tables.
    pub fn builtin() -> &'static Catalog {
        crate::tables::builtin()
    }

    /// Parse a catalog override. Missing fields keep their built-in values.
    pub fn from_json(json: &str) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Catalog, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Catalog::from_json(&json)
    }

    /// Check the structural invariants the tree builder relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.fallback_module.trim().is_empty() {
            return Err(CatalogError::BlankEntry("catch-all module key"));
        }
        if self.fallback_category.trim().is_empty() {
            return Err(CatalogError::BlankEntry("catch-all category key"));
        }

        let mut seen = HashSet::new();
        for def in &self.modules {
            if def.key.trim().is_empty() {
                return Err(CatalogError::BlankEntry("module key"));
            }
            if def.label.trim().is_empty() {
                return Err(CatalogError::BlankEntry("module label"));
            }
            if !seen.insert(def.key.as_str()) {
                return Err(CatalogError::DuplicateModule(def.key.clone()));
            }
        }

        let fallback = self
            .module_def(&self.fallback_module)
            .ok_or_else(|| CatalogError::MissingCatchAll(self.fallback_module.clone()))?;
        if let Some(other) = self.modules.iter().find(|d| d.key != fallback.key && d.order >= fallback.order) {
            return Err(CatalogError::CatchAllNotLast {
                module: fallback.key.clone(),
                order: fallback.order,
                other: other.key.clone(),
                other_order: other.order,
            });
        }

        for start in self.supersessions.keys() {
            // An acyclic chain ends within `len` links.
            let mut current = start.as_str();
            for _ in 0..self.supersessions.len() {
                match self.supersessions.get(current) {
                    Some(next) => current = next.as_str(),
                    None => break,
                }
            }
            if self.supersessions.contains_key(current) {
                return Err(CatalogError::SupersessionCycle(start.clone()));
            }
        }

        let blank_label = self
            .category_labels
            .values()
            .flat_map(|t| t.values())
            .chain(self.operation_labels.values())
            .any(|label| label.trim().is_empty());
        if blank_label {
            return Err(CatalogError::BlankEntry("category label"));
        }

        Ok(())
    }

    pub fn module_def(&self, module: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|d| d.key == module)
    }

    /// Definition for `module`, or the catch-all's when it is not configured.
    ///
    /// Falls back to a synthetic last-place entry if the catch-all itself is
    /// missing, which only happens for catalogs that skipped `validate`.
    pub(crate) fn module_def_or_fallback(&self, module: &str) -> (u32, &str) {
        match self.module_def(module).or_else(|| self.module_def(&self.fallback_module)) {
            Some(def) => (def.order, def.label.as_str()),
            None => (u32::MAX, self.fallback_module.as_str()),
        }
    }

    pub(crate) fn remap_module<'a>(&'a self, module: &'a str) -> &'a str {
        self.module_remaps.get(module).map(String::as_str).unwrap_or(module)
    }

    pub(crate) fn module_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.prefix_modules.get(prefix).map(String::as_str)
    }

    /// The current prefix superseding `prefix`, if `prefix` is a legacy one.
    /// Follows chained supersessions to the last link.
    pub(crate) fn superseding_prefix(&self, prefix: &str) -> Option<&str> {
        let mut current = self.supersessions.get(prefix)?.as_str();
        for _ in 1..self.supersessions.len() {
            match self.supersessions.get(current) {
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        Some(current)
    }

    /// True when `newer` appears anywhere on the supersession chain of `older`.
    pub(crate) fn supersedes(&self, newer: &str, older: &str) -> bool {
        let mut current = older;
        for _ in 0..self.supersessions.len() {
            match self.supersessions.get(current) {
                Some(next) if next.as_str() == newer => return true,
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        false
    }

    /// A prefix other prefixes fold into, and which is not itself legacy.
    pub(crate) fn is_current_prefix(&self, prefix: &str) -> bool {
        !self.supersessions.contains_key(prefix) && self.supersessions.values().any(|current| current == prefix)
    }

    /// Module keys in configured order, followed by label-table modules that
    /// have no definition (alphabetically).
    pub(crate) fn label_table_order(&self) -> Vec<&str> {
        let mut defs: Vec<&ModuleDef> = self.modules.iter().collect();
        defs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));

        let mut keys: Vec<&str> = defs.iter().map(|d| d.key.as_str()).collect();
        for module in self.category_labels.keys() {
            if !keys.contains(&module.as_str()) {
                keys.push(module);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        Catalog::builtin().validate().unwrap();
        assert_eq!(Catalog::builtin().fallback_module, "other");
    }

    #[test]
    fn json_override_keeps_missing_fields() {
        let catalog = Catalog::from_json(r#"{ "operationLabels": { "view": "Browse" } }"#).unwrap();

        assert_eq!(catalog.operation_labels.get("view").map(String::as_str), Some("Browse"));
        assert_eq!(catalog.modules, Catalog::builtin().modules);
        assert_eq!(catalog.prefix_modules, Catalog::builtin().prefix_modules);
    }

    #[test]
    fn catch_all_must_sort_last() {
        let json = r#"{
            "modules": [
                { "key": "aup", "order": 1, "label": "Protocols" },
                { "key": "other", "order": 5, "label": "Other" },
                { "key": "hr", "order": 7, "label": "People" }
            ]
        }"#;

        match Catalog::from_json(json) {
            Err(CatalogError::CatchAllNotLast { other, other_order, .. }) => {
                assert_eq!(other, "hr");
                assert_eq!(other_order, 7);
            }
            other => panic!("expected CatchAllNotLast, got {other:?}"),
        }
    }

    #[test]
    fn missing_catch_all_is_rejected() {
        let json = r#"{ "modules": [ { "key": "aup", "order": 1, "label": "Protocols" } ] }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::MissingCatchAll(m)) if m == "other"));
    }

    #[test]
    fn duplicate_modules_are_rejected() {
        let json = r#"{
            "modules": [
                { "key": "aup", "order": 1, "label": "Protocols" },
                { "key": "aup", "order": 2, "label": "Protocols again" },
                { "key": "other", "order": 9, "label": "Other" }
            ]
        }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::DuplicateModule(m)) if m == "aup"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(Catalog::from_json("{ not json"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn chained_supersessions_resolve_to_last_link() {
        let mut catalog = Catalog::builtin().clone();
        catalog.supersessions = BTreeMap::from([("animal".into(), "swine".into()), ("swine".into(), "pig".into())]);
        catalog.validate().unwrap();

        assert_eq!(catalog.superseding_prefix("animal"), Some("pig"));
        assert_eq!(catalog.superseding_prefix("swine"), Some("pig"));
        assert_eq!(catalog.superseding_prefix("pig"), None);
        assert!(catalog.supersedes("swine", "animal"));
        assert!(catalog.supersedes("pig", "animal"));
        assert!(!catalog.supersedes("animal", "swine"));
        assert!(catalog.is_current_prefix("pig"));
        assert!(!catalog.is_current_prefix("swine"));
    }

    #[test]
    fn supersession_cycles_are_rejected() {
        let json = r#"{ "supersessions": { "animal": "pig", "pig": "swine", "swine": "animal" } }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::SupersessionCycle(p)) if p == "animal"));

        let json = r#"{ "supersessions": { "pig": "pig" } }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::SupersessionCycle(p)) if p == "pig"));
    }

    #[test]
    fn label_table_order_follows_module_order() {
        let order = Catalog::builtin().label_table_order();
        assert_eq!(&order[..5], &["aup", "pig", "erp", "dev", "hr"]);
    }
}
