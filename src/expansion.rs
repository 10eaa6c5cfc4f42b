//! Expand/collapse state for a rendered permission tree.
//!
//! This is presentation state owned by the caller. The engine never reads it;
//! it only offers the key helpers so the caller can derive keys from a tree.

use crate::ModuleGroup;
use std::collections::BTreeSet;

/// Key of a category row: `module.category`.
pub fn category_key(module: &str, category: &str) -> String {
    format!("{module}.{category}")
}

/// A set of expanded keys with toggle semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    open: BTreeSet<String>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        ExpansionSet::default()
    }

    /// Flip `key`; returns whether it is expanded afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.open.remove(key) {
            false
        } else {
            self.open.insert(key.to_string());
            true
        }
    }

    pub fn expand_all<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.open.extend(keys.into_iter().map(Into::into));
    }

    pub fn collapse_all(&mut self) {
        self.open.clear();
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.open.contains(key)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Module rows and category rows, tracked independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pub modules: ExpansionSet,
    pub categories: ExpansionSet,
}

impl ExpansionState {
    pub fn new() -> Self {
        ExpansionState::default()
    }

    /// Open every module and category row of `tree`.
    pub fn expand_tree(&mut self, tree: &[ModuleGroup]) {
        self.modules.expand_all(tree.iter().map(|m| m.module.clone()));
        self.categories.expand_all(
            tree.iter().flat_map(|m| m.categories.iter().map(move |c| category_key(&m.module, &c.category))),
        );
    }

    pub fn collapse_all(&mut self) {
        self.modules.collapse_all();
        self.categories.collapse_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PermissionRecord, resolve};

    #[test]
    fn toggle_flips_membership() {
        let mut set = ExpansionSet::new();
        assert!(set.toggle("erp"));
        assert!(set.is_expanded("erp"));
        assert!(!set.toggle("erp"));
        assert!(!set.is_expanded("erp"));
    }

    #[test]
    fn expand_all_then_collapse_all() {
        let mut set = ExpansionSet::new();
        set.expand_all(["aup", "erp", "aup"]);
        assert_eq!(set.len(), 2);

        set.collapse_all();
        assert!(set.is_empty());
        assert!(!set.is_expanded("aup"));
    }

    #[test]
    fn expand_tree_opens_modules_and_categories() {
        let taxonomy = resolve(&[
            PermissionRecord::new("1", "erp.stock.view", "View stock"),
            PermissionRecord::new("2", "hr.leave.approve", "Approve leave"),
        ]);

        let mut state = ExpansionState::new();
        state.expand_tree(&taxonomy.tree);

        assert!(state.modules.is_expanded("erp"));
        assert!(state.modules.is_expanded("hr"));
        assert!(state.categories.is_expanded(&category_key("erp", "stock")));
        assert!(state.categories.is_expanded("hr.leave"));

        state.collapse_all();
        assert_eq!(state, ExpansionState::new());
    }
}
