//! Ordered in-memory entry store.
//!
//! Parses and serializes the `keys<TAB>body` record format shared by every
//! pipeline boundary: keys are pipe-delimited forms, the body is opaque text.

use std::collections::HashSet;

use crate::models::Entry;

/// The full corpus for one stage, in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    pub entries: Vec<Entry>,
    /// Lines that failed to parse into keys + body. Skipped, never fatal.
    pub malformed_records: usize,
    /// Blank lines and records whose key list collapsed to nothing.
    pub dropped_noise: usize,
}

impl EntryStore {
    /// Parse newline-delimited records.
    ///
    /// Positions are assigned from the ingestion index and stay stable until
    /// a merge explicitly tightens them. Duplicate keys within one record are
    /// collapsed, first occurrence winning.
    pub fn parse(text: &str) -> EntryStore {
        let mut store = EntryStore::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                store.dropped_noise += 1;
                continue;
            }

            let (key_field, body) = match line.split_once('\t') {
                Some((keys, body)) => (keys, body),
                None => (line, ""),
            };

            // An empty key field in front of a body is a malformed record;
            // a line with no keys at all is just noise.
            if key_field.trim().is_empty() {
                if body.trim().is_empty() {
                    store.dropped_noise += 1;
                } else {
                    store.malformed_records += 1;
                }
                continue;
            }

            let mut keys: Vec<String> = Vec::new();
            for raw in key_field.split('|') {
                let form = raw.trim();
                if form.is_empty() || keys.iter().any(|k| k == form) {
                    continue;
                }
                keys.push(form.to_string());
            }

            if keys.is_empty() {
                store.dropped_noise += 1;
                continue;
            }

            let position = Some(store.entries.len());
            store
                .entries
                .push(Entry::new(keys, body.to_string(), position));
        }

        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total headword forms across all entries.
    pub fn form_count(&self) -> usize {
        self.entries.iter().map(|e| e.keys.len()).sum()
    }

    /// Set of every form that appears as a top-level key.
    pub fn all_forms(&self) -> HashSet<String> {
        let mut forms = HashSet::with_capacity(self.form_count());
        for entry in &self.entries {
            for key in &entry.keys {
                forms.insert(key.clone());
            }
        }
        forms
    }

    /// Find the entry index owning a form, if any.
    pub fn entry_with_key(&self, form: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.has_key(form))
    }

    /// Serialize every entry back to the record shape, in ascending position.
    ///
    /// Entries without a resolved position are appended last, in encounter
    /// order. Entries with an empty body are written without a trailing tab.
    pub fn serialize(&self) -> String {
        let mut positioned: Vec<&Entry> = self.entries.iter().collect();
        positioned.sort_by_key(|e| e.position.unwrap_or(usize::MAX));

        let mut out = String::new();
        for entry in positioned {
            out.push_str(&entry.keys.join("|"));
            if !entry.body.is_empty() {
                out.push('\t');
                out.push_str(&entry.body);
            }
            out.push('\n');
        }
        out
    }
}

/// Forms that appear in more than one entry's key list.
///
/// An empty result is the global-uniqueness invariant holding.
pub fn duplicate_keys(store: &EntryStore) -> Vec<(String, usize)> {
    use std::collections::HashMap;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in &store.entries {
        for key in &entry.keys {
            *counts.entry(key.as_str()).or_default() += 1;
        }
    }

    let mut repeated: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(form, count)| (form.to_string(), count))
        .collect();
    repeated.sort();
    repeated
}

/// Keys whose entry carries no body at all.
pub fn keys_with_empty_body(store: &EntryStore) -> Vec<String> {
    let mut keys = Vec::new();
    for entry in &store.entries {
        if entry.body.trim().is_empty() {
            keys.extend(entry.keys.iter().cloned());
        }
    }
    keys
}
