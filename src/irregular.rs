//! Irregular-inflection edge adapter.
//!
//! Irregular plurals, past tenses and past participles appear in the corpus
//! as their own lines whose body is a relational annotation back to the base
//! word, e.g.
//!
//! ```text
//! went   <div style="margin-left:1em"><i class="p"><font color="green">past</font></i> <i class="p"><font color="green">від</font></i> &lt;&lt;go&gt;&gt;</div>
//! ```
//!
//! The base list is pipe-separated, so one inflected form may fan in to
//! several bases ("better" to both "good" and "well"). Consumed lines are
//! deleted; their forms become satellites of the base entries.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dedup::DedupGuard;
use crate::models::{Edge, EdgeSource};
use crate::store::EntryStore;

static PLURAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<div style="margin-left:1em"><i class="p"><font color="green">pl</font></i>.*?&lt;&lt;([^<>&]*?)&gt;&gt;</div>$"#,
    )
    .unwrap()
});

static PAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<div style="margin-left:1em"><i class="p"><font color="green">past</font></i> <i class="p"><font color="green">від</font></i> &lt;&lt;([^<>&]*?)&gt;&gt;</div>$"#,
    )
    .unwrap()
});

static PAST_PARTICIPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<div style="margin-left:1em"><i class="p"><font color="green">p\.p\.</font></i> <i class="p"><font color="green">від</font></i> &lt;&lt;([^<>&]*?)&gt;&gt;</div>$"#,
    )
    .unwrap()
});

/// The closed set of irregular-inflection annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflectionKind {
    Plural,
    Past,
    PastParticiple,
}

impl InflectionKind {
    fn pattern(&self) -> &'static Regex {
        match self {
            InflectionKind::Plural => &PLURAL,
            InflectionKind::Past => &PAST,
            InflectionKind::PastParticiple => &PAST_PARTICIPLE,
        }
    }

    fn edge_source(&self) -> EdgeSource {
        match self {
            InflectionKind::Plural => EdgeSource::IrregularNoun,
            InflectionKind::Past => EdgeSource::IrregularVerbPast,
            InflectionKind::PastParticiple => EdgeSource::IrregularVerbParticiple,
        }
    }
}

/// Parse the base list out of a body matching one of the given kinds.
/// Returns the matched kind and the pipe-split bases.
pub fn irregular_bases<'a>(
    body: &'a str,
    kinds: &[InflectionKind],
) -> Option<(InflectionKind, Vec<&'a str>)> {
    for &kind in kinds {
        if let Some(caps) = kind.pattern().captures(body.trim()) {
            let bases: Vec<&str> = caps
                .get(1)
                .unwrap()
                .as_str()
                .split('|')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .collect();
            if bases.is_empty() {
                return None;
            }
            return Some((kind, bases));
        }
    }
    None
}

/// Result of one irregular-inflection extraction pass.
#[derive(Debug, Default)]
pub struct IrregularOutcome {
    pub edges: Vec<Edge>,
    pub consumed_entries: usize,
    /// Every base and inflected form touched by this pass; the
    /// regular-inflection stage must not generate over these.
    pub forms: HashSet<String>,
}

/// Extract irregular-inflection edges and delete the consumed lines.
///
/// Inflected forms are claimed unconditionally: the annotations are
/// authoritative lexical relations. Bases are not required to resolve here;
/// a base with no surviving entry simply leaves an anchorless component for
/// the resolver to discard.
pub fn extract_irregular_inflections(
    store: &mut EntryStore,
    kinds: &[InflectionKind],
    guard: &mut DedupGuard,
) -> IrregularOutcome {
    let mut outcome = IrregularOutcome::default();
    let mut consumed: HashSet<usize> = HashSet::new();

    for (idx, entry) in store.entries.iter().enumerate() {
        let Some((kind, bases)) = irregular_bases(&entry.body, kinds) else {
            continue;
        };
        for inflected in &entry.keys {
            guard.assert_claim(inflected);
            outcome.forms.insert(inflected.clone());
            for base in &bases {
                outcome.forms.insert((*base).to_string());
                outcome
                    .edges
                    .push(Edge::new(inflected.clone(), *base, kind.edge_source()));
            }
        }
        consumed.insert(idx);
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

/// Group extracted edges into `base -> inflected forms` table rows, bases in
/// first-appearance order.
pub fn table_rows(edges: &[Edge]) -> Vec<(String, Vec<String>)> {
    let mut rows: Vec<(String, Vec<String>)> = Vec::new();
    for edge in edges {
        // Adapter edges are (inflected, base).
        let base = &edge.b;
        let inflected = &edge.a;
        match rows.iter_mut().find(|(b, _)| b == base) {
            Some((_, forms)) => {
                if !forms.iter().any(|f| f == inflected) {
                    forms.push(inflected.clone());
                }
            }
            None => rows.push((base.clone(), vec![inflected.clone()])),
        }
    }
    rows
}

/// Parse `base,variant1,variant2…` rows. Trailing empty fields are ignored;
/// rows without any variant are skipped.
pub fn parse_table(text: &str) -> Vec<(String, Vec<String>)> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split(',').map(str::trim);
        let Some(base) = fields.next() else {
            continue;
        };
        if base.is_empty() {
            continue;
        }
        let variants: Vec<String> = fields
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if variants.is_empty() {
            continue;
        }
        rows.push((base.to_string(), variants));
    }
    rows
}
