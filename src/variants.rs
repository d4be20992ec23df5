//! British/American spelling variants.
//!
//! The variant table is a flat list of `(british, american)` pairs,
//! interpreted symmetrically. Insert-if-absent is explicit: the first
//! occurrence of a spelling wins and later duplicates are silently ignored,
//! rather than leaning on map insertion-order accidents.

use std::collections::HashMap;

use crate::dedup::DedupGuard;
use crate::models::{Edge, EdgeSource};
use crate::store::EntryStore;

/// Symmetric spelling-variant lookup.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    counterpart: HashMap<String, String>,
}

impl VariantTable {
    pub fn new() -> Self {
        VariantTable::default()
    }

    /// Insert a pair in both directions. Rejects identical pairs and any pair
    /// where either spelling is already mapped (first wins).
    pub fn insert_pair(&mut self, british: &str, american: &str) -> bool {
        let british = british.trim();
        let american = american.trim();
        if british.is_empty() || american.is_empty() || british == american {
            return false;
        }
        if self.counterpart.contains_key(british) || self.counterpart.contains_key(american) {
            return false;
        }
        self.counterpart
            .insert(british.to_string(), american.to_string());
        self.counterpart
            .insert(american.to_string(), british.to_string());
        true
    }

    pub fn counterpart(&self, form: &str) -> Option<&str> {
        self.counterpart.get(form).map(String::as_str)
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.counterpart.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.counterpart.is_empty()
    }

    /// Parse a `british,american` CSV, one pair per line.
    pub fn parse_csv(text: &str) -> VariantTable {
        let mut table = VariantTable::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((british, american)) = line.split_once(',') {
                table.insert_pair(british, american);
            }
        }
        table
    }

    /// Parse the upstream varcon word list.
    ///
    /// Each line holds slash-separated `TAGS: word` clusters; `A` marks the
    /// American spelling, `B` or `Z` the British one. Usage notes after
    /// `" | "` are stripped, comments and identical pairs skipped.
    pub fn parse_varcon(text: &str) -> VariantTable {
        let mut table = VariantTable::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.split('|').next().unwrap_or("").trim();

            let mut american: Option<&str> = None;
            let mut british: Option<&str> = None;
            for part in line.split('/') {
                let Some((tags, word)) = part.split_once(": ") else {
                    continue;
                };
                let word = word.trim();
                let tags: Vec<&str> = tags.split_whitespace().collect();
                if tags.contains(&"A") {
                    american = Some(word);
                }
                if tags.contains(&"B") || tags.contains(&"Z") {
                    british = Some(word);
                }
            }

            if let (Some(british), Some(american)) = (british, american) {
                table.insert_pair(british, american);
            }
        }

        table
    }
}

/// Result of one spelling-variant pass.
#[derive(Debug, Default)]
pub struct VariantOutcome {
    pub edges: Vec<Edge>,
    pub duplicate_claims: usize,
}

/// Emit spelling-variant edges for every key with a known counterpart.
///
/// No edge is emitted when the counterpart already exists as a top-level key
/// anywhere in the corpus: two spellings that both carry their own bodies are
/// intentionally separate entries. Counterparts are speculative, so each one
/// must pass the global guard; a form already claimed elsewhere is dropped
/// silently.
pub fn spelling_variant_edges(
    store: &EntryStore,
    table: &VariantTable,
    guard: &mut DedupGuard,
) -> VariantOutcome {
    let mut outcome = VariantOutcome::default();
    let all_forms = store.all_forms();

    for entry in &store.entries {
        for key in &entry.keys {
            let Some(counterpart) = table.counterpart(key) else {
                continue;
            };
            if all_forms.contains(counterpart) {
                continue;
            }
            if !guard.try_claim(counterpart) {
                outcome.duplicate_claims += 1;
                continue;
            }
            outcome
                .edges
                .push(Edge::new(key.clone(), counterpart, EdgeSource::SpellingVariant));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_pair_symmetric() {
        let mut table = VariantTable::new();
        assert!(table.insert_pair("colour", "color"));
        assert_eq!(table.counterpart("colour"), Some("color"));
        assert_eq!(table.counterpart("color"), Some("colour"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_first_pair_wins() {
        let mut table = VariantTable::new();
        assert!(table.insert_pair("colour", "color"));
        assert!(!table.insert_pair("colour", "kolor"));
        assert_eq!(table.counterpart("colour"), Some("color"));
        assert_eq!(table.counterpart("kolor"), None);
    }

    #[test]
    fn test_identical_pair_rejected() {
        let mut table = VariantTable::new();
        assert!(!table.insert_pair("gray", "gray"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_csv() {
        let table = VariantTable::parse_csv("colour,color\nhonour,honor\n\ncolour,kolor\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.counterpart("honour"), Some("honor"));
        assert_eq!(table.counterpart("colour"), Some("color"));
    }

    #[test]
    fn test_parse_varcon() {
        let text = "\
# comment line
A: color / B: colour
A: theater / B Z: theatre | usage note ignored
A: gray / B: gray
no tags here
";
        let table = VariantTable::parse_varcon(text);
        assert_eq!(table.len(), 2);
        assert_eq!(table.counterpart("colour"), Some("color"));
        assert_eq!(table.counterpart("theatre"), Some("theater"));
        assert_eq!(table.counterpart("gray"), None);
    }

    #[test]
    fn test_edges_for_missing_counterpart() {
        let store = EntryStore::parse("colour\tpaint\n");
        let table = VariantTable::parse_csv("colour,color\n");
        let mut guard = DedupGuard::new();

        let outcome = spelling_variant_edges(&store, &table, &mut guard);
        assert_eq!(outcome.edges.len(), 1);
        assert_eq!(outcome.edges[0].a, "colour");
        assert_eq!(outcome.edges[0].b, "color");
        assert!(guard.is_used("color"));
    }

    #[test]
    fn test_no_edge_when_both_entries_exist() {
        // colour and color each carry their own body: keep them separate.
        let store = EntryStore::parse("colour\tBritish paint\ncolor\tAmerican paint\n");
        let table = VariantTable::parse_csv("colour,color\n");
        let mut guard = DedupGuard::new();

        let outcome = spelling_variant_edges(&store, &table, &mut guard);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.duplicate_claims, 0);
    }

    #[test]
    fn test_no_edge_when_counterpart_already_in_key_list() {
        let store = EntryStore::parse("colour|color\tpaint\n");
        let table = VariantTable::parse_csv("colour,color\n");
        let mut guard = DedupGuard::new();

        let outcome = spelling_variant_edges(&store, &table, &mut guard);
        assert!(outcome.edges.is_empty());
    }

    #[test]
    fn test_claimed_counterpart_dropped() {
        let store = EntryStore::parse("colour\tpaint\n");
        let table = VariantTable::parse_csv("colour,color\n");
        let mut guard = DedupGuard::new();
        guard.assert_claim("color");

        let outcome = spelling_variant_edges(&store, &table, &mut guard);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.duplicate_claims, 1);
    }
}
