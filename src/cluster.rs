//! Cluster resolution.
//!
//! Finds connected components of the variant graph and folds each component's
//! satellite forms into its anchor entries. Traversal uses an explicit
//! work-list and visited-set, never recursion, so arbitrarily large
//! components cost only heap.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::VariantGraph;
use crate::store::EntryStore;

/// Accounting for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Components that had at least one anchor and were merged.
    pub components: usize,
    /// Components with no anchor at all; they cannot stand alone as entries
    /// and are dropped.
    pub discarded_components: usize,
    /// Satellite forms appended to anchor key lists, counted per absorption.
    pub absorbed_forms: usize,
}

/// Resolve every connected component of `graph` against `store`.
///
/// Component members split into anchors (forms that are keys of surviving
/// entries) and satellites (forms with no body of their own). Every anchor
/// entry independently absorbs the full satellite set; this cloning policy is
/// deliberate for multi-anchor components and is applied identically at every
/// stage. Within a merged key list, the entry's original keys keep their
/// relative order and satellites are appended in first-discovery order.
pub fn resolve_clusters(store: &mut EntryStore, graph: &VariantGraph) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    if graph.is_empty() {
        return outcome;
    }

    // Map each form to the entry that owns it. Under the global uniqueness
    // invariant a form has one owner; if the input violates that, the first
    // entry wins. Keys are owned because entries are mutated further down.
    let mut owner: HashMap<String, usize> = HashMap::new();
    for (idx, entry) in store.entries.iter().enumerate() {
        for key in &entry.keys {
            owner.entry(key.clone()).or_insert(idx);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();

    for start in graph.nodes() {
        if visited.contains(start.as_str()) {
            continue;
        }

        // Breadth-first walk; member order is discovery order.
        let mut members: Vec<&str> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        visited.insert(start.as_str());
        queue.push_back(start.as_str());

        while let Some(form) = queue.pop_front() {
            members.push(form);
            for neighbor in graph.neighbors(form) {
                if visited.insert(neighbor.as_str()) {
                    queue.push_back(neighbor.as_str());
                }
            }
        }

        let mut anchors: Vec<usize> = Vec::new();
        let mut satellites: Vec<&str> = Vec::new();
        for &form in &members {
            match owner.get(form) {
                Some(&idx) => {
                    if !anchors.contains(&idx) {
                        anchors.push(idx);
                    }
                }
                None => satellites.push(form),
            }
        }

        if anchors.is_empty() {
            outcome.discarded_components += 1;
            continue;
        }
        outcome.components += 1;

        for &idx in &anchors {
            let entry = &mut store.entries[idx];
            for &satellite in &satellites {
                if entry.push_key(satellite) {
                    outcome.absorbed_forms += 1;
                }
            }
        }
    }

    outcome
}
