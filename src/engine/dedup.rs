//! Permission deduplication.
//!
//! Permission sources are messy: the same record may be listed twice, and a
//! capability that moved from a legacy code prefix to a current one (for
//! example `animal.*` to `pig.*`) can show up under both codes. This module
//! collapses the raw list into one [`CanonicalPermission`] per logical
//! permission in three passes:
//!
//! ```text
//! raw ──▶ (1) first occurrence per id
//!     ──▶ (2) one record per canonical code key, with precedence
//!     ──▶ (3) one bucket per id
//! ```
//!
//! ## Code keys
//!
//! Two codes are "the same" when they agree after rewriting a legacy first
//! segment to the prefix that supersedes it, following chained supersessions
//! to the end. `animal.record.view` and `pig.record.view` therefore share the
//! key `pig.record.view`.
//!
//! ## Precedence
//!
//! When a later record hits an occupied key it replaces the occupant if
//!
//! - its prefix supersedes the occupant's prefix, directly or through a chain, or
//! - the occupant does not carry a current prefix and the candidate's code is
//!   strictly longer.
//!
//! Otherwise the first-seen record stays. A replacement keeps the occupant's
//! slot, so output order is the order in which keys were first seen.

use crate::{CanonicalPermission, Catalog, PermissionRecord};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// What the deduplicator dropped, for diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupReport {
    pub input: usize,
    /// Records discarded because their id was already seen.
    pub duplicate_ids: usize,
    /// Records discarded (or displaced) by another record with the same code key.
    pub superseded_codes: usize,
    /// Records skipped because their id was already placed.
    pub reassigned: usize,
    pub output: usize,
}

pub(crate) fn deduplicate(catalog: &Catalog, records: &[PermissionRecord]) -> (Vec<CanonicalPermission>, DedupReport) {
    let mut report = DedupReport { input: records.len(), ..DedupReport::default() };

    // Pass 1: identity.
    let mut seen_ids: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut unique_by_id: Vec<&PermissionRecord> = Vec::with_capacity(records.len());
    for record in records {
        if seen_ids.insert(record.id.as_str()) {
            unique_by_id.push(record);
        } else {
            trace!(id = %record.id, code = %record.code, "dropping duplicate id");
            report.duplicate_ids += 1;
        }
    }

    // Pass 2: code key with precedence.
    let mut slots: Vec<&PermissionRecord> = Vec::with_capacity(unique_by_id.len());
    let mut by_key: HashMap<Cow<'_, str>, usize> = HashMap::with_capacity(unique_by_id.len());
    for candidate in unique_by_id {
        let key = code_key(catalog, &candidate.code);
        match by_key.get(&key).copied() {
            None => {
                by_key.insert(key, slots.len());
                slots.push(candidate);
            }
            Some(slot) => {
                let existing = slots[slot];
                if should_replace(catalog, existing, candidate) {
                    trace!(kept = %candidate.code, dropped = %existing.code, "code superseded");
                    slots[slot] = candidate;
                } else {
                    trace!(kept = %existing.code, dropped = %candidate.code, "code already present");
                }
                report.superseded_codes += 1;
            }
        }
    }

    // Pass 3: each id lands in exactly one bucket.
    let mut placed: HashSet<&str> = HashSet::with_capacity(slots.len());
    let mut canonical = Vec::with_capacity(slots.len());
    for record in slots {
        if !placed.insert(record.id.as_str()) {
            report.reassigned += 1;
            continue;
        }
        canonical.push(CanonicalPermission::new(record.clone()));
    }

    report.output = canonical.len();
    debug!(
        input = report.input,
        duplicate_ids = report.duplicate_ids,
        superseded_codes = report.superseded_codes,
        output = report.output,
        "deduplicated permissions"
    );

    (canonical, report)
}

/// Code with a legacy first segment rewritten to its current prefix.
pub(crate) fn code_key<'c>(catalog: &Catalog, code: &'c str) -> Cow<'c, str> {
    let (prefix, rest) = match code.split_once('.') {
        Some((prefix, rest)) => (prefix, Some(rest)),
        None => (code, None),
    };

    match (catalog.superseding_prefix(prefix), rest) {
        (Some(current), Some(rest)) => Cow::Owned(format!("{current}.{rest}")),
        (Some(current), None) => Cow::Owned(current.to_string()),
        (None, _) => Cow::Borrowed(code),
    }
}

fn should_replace(catalog: &Catalog, existing: &PermissionRecord, candidate: &PermissionRecord) -> bool {
    let existing_prefix = prefix(&existing.code);
    let candidate_prefix = prefix(&candidate.code);

    if catalog.supersedes(candidate_prefix, existing_prefix) {
        return true;
    }

    !catalog.is_current_prefix(existing_prefix) && candidate.code.chars().count() > existing.code.chars().count()
}

fn prefix(code: &str) -> &str {
    code.split('.').next().unwrap_or(code)
}
