//! Cross-reference edge adapter.
//!
//! A cross-reference line's body is nothing but a see-also annotation
//! pointing at another headword, in the dictionary's green-font markup:
//!
//! ```text
//! colour   <div ...><i class="p"><font color="green">див.</font></i> &lt;&lt;color&gt;&gt;</div>
//! ```
//!
//! The line is fully subsumed by the target entry, so after its edge is
//! captured the line is deleted from the store. A target that does not
//! resolve to any existing form leaves the line untouched.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dedup::DedupGuard;
use crate::models::{Edge, EdgeSource};
use crate::store::EntryStore;

static CROSS_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<div [^>]*><i class="p"><font color="green">див\.</font></i> &lt;&lt;([^<>&]+?)&gt;&gt;</div>$"#,
    )
    .unwrap()
});

/// Result of one cross-reference extraction pass.
#[derive(Debug, Default)]
pub struct CrossRefOutcome {
    pub edges: Vec<Edge>,
    /// Lines deleted because their content is subsumed by the target.
    pub consumed_entries: usize,
    /// Cross-references whose target resolves to no existing form; the edge
    /// is dropped and the line kept unresolved.
    pub unresolved_targets: usize,
}

/// Parse the see-also target out of a body, if the body is exactly a
/// cross-reference annotation.
pub fn cross_reference_target(body: &str) -> Option<&str> {
    CROSS_REF
        .captures(body.trim())
        .map(|caps| caps.get(1).unwrap().as_str().trim())
}

/// Extract cross-reference edges and delete the subsumed lines.
///
/// Every key of a consumed line is claimed in the guard unconditionally:
/// cross-references are asserted lexical relations, not speculation.
pub fn extract_cross_references(
    store: &mut EntryStore,
    guard: &mut DedupGuard,
) -> CrossRefOutcome {
    let mut outcome = CrossRefOutcome::default();

    // Targets must resolve against entries that will survive this pass, so
    // collect the candidate set first.
    let mut candidates: Vec<(usize, String)> = Vec::new();
    for (idx, entry) in store.entries.iter().enumerate() {
        if let Some(target) = cross_reference_target(&entry.body) {
            candidates.push((idx, target.to_string()));
        }
    }
    if candidates.is_empty() {
        return outcome;
    }

    let candidate_set: HashSet<usize> = candidates.iter().map(|&(idx, _)| idx).collect();
    let mut resolvable: HashSet<&str> = HashSet::new();
    for (idx, entry) in store.entries.iter().enumerate() {
        if !candidate_set.contains(&idx) {
            for key in &entry.keys {
                resolvable.insert(key.as_str());
            }
        }
    }

    let mut consumed: HashSet<usize> = HashSet::new();
    for (idx, target) in &candidates {
        if !resolvable.contains(target.as_str()) {
            outcome.unresolved_targets += 1;
            continue;
        }
        for key in &store.entries[*idx].keys {
            guard.assert_claim(key);
            outcome
                .edges
                .push(Edge::new(key.clone(), target.clone(), EdgeSource::CrossReference));
        }
        consumed.insert(*idx);
    }

    if !consumed.is_empty() {
        let mut idx = 0;
        store.entries.retain(|_| {
            let keep = !consumed.contains(&idx);
            idx += 1;
            keep
        });
        outcome.consumed_entries = consumed.len();
    }

    outcome
}
