//! Regular-inflection generation.
//!
//! The morphology generator itself lives behind [`MorphologyOracle`]; this
//! module only decides which of its suggestions become edges. A generated
//! form is accepted only if it is genuinely new: not the base itself, not a
//! key anywhere in the corpus, not an irregular form, not generated earlier
//! in this stage by another base, and not claimed by any previous stage.

use std::collections::{HashMap, HashSet};

use indicatif::{ProgressBar, ProgressStyle};

use crate::dedup::DedupGuard;
use crate::models::{Edge, EdgeSource, PartOfSpeech};
use crate::store::EntryStore;

/// A deterministic source of inflected forms for a base word.
///
/// Implementations must return the same forms for identical inputs within
/// one run. An empty result means the oracle has nothing usable for this
/// base; the caller skips it.
pub trait MorphologyOracle {
    fn infer(&self, base: &str, pos: PartOfSpeech) -> Vec<String>;
}

/// An oracle backed by flat per-part-of-speech tables of
/// `base,form1,form2…` rows.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    tables: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
}

impl TableOracle {
    pub fn new() -> Self {
        TableOracle::default()
    }

    /// Load one part of speech from pre-parsed table rows. First row for a
    /// base wins.
    pub fn with_rows(mut self, pos: PartOfSpeech, rows: Vec<(String, Vec<String>)>) -> Self {
        let table = self.tables.entry(pos).or_default();
        for (base, forms) in rows {
            table.entry(base).or_insert(forms);
        }
        self
    }

    /// Load one part of speech from CSV text.
    pub fn with_csv(self, pos: PartOfSpeech, text: &str) -> Self {
        self.with_rows(pos, crate::irregular::parse_table(text))
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(HashMap::is_empty)
    }
}

impl MorphologyOracle for TableOracle {
    fn infer(&self, base: &str, pos: PartOfSpeech) -> Vec<String> {
        self.tables
            .get(&pos)
            .and_then(|table| table.get(base))
            .cloned()
            .unwrap_or_default()
    }
}

/// Result of one regular-inflection pass.
#[derive(Debug, Default)]
pub struct RegularOutcome {
    pub edges: Vec<Edge>,
    pub duplicate_claims: usize,
    /// Bases the oracle produced nothing usable for.
    pub oracle_skips: usize,
}

// Generation order is fixed: nouns, then adjectives, then verbs, exactly the
// order the inflection tables were historically applied in.
const POS_ORDER: [PartOfSpeech; 3] = [
    PartOfSpeech::Noun,
    PartOfSpeech::Adjective,
    PartOfSpeech::Verb,
];

/// Generate regular-inflection edges for every part-of-speech-tagged entry.
///
/// `exclude` carries all forms touched by the irregular stages; bases and
/// candidates in it are skipped outright. One stage-local generated set spans
/// all three parts of speech, distinct from the cross-stage guard.
pub fn generate_regular_inflections(
    store: &EntryStore,
    oracle: &dyn MorphologyOracle,
    exclude: &HashSet<String>,
    guard: &mut DedupGuard,
    show_progress: bool,
) -> RegularOutcome {
    let mut outcome = RegularOutcome::default();
    let all_forms = store.all_forms();
    let mut generated: HashSet<String> = HashSet::new();

    let progress = if show_progress {
        let pb = ProgressBar::new((store.len() * POS_ORDER.len()) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    for pos in POS_ORDER {
        for entry in &store.entries {
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            if !pos.matches(&entry.body) {
                continue;
            }
            for base in &entry.keys {
                if exclude.contains(base) {
                    continue;
                }
                let forms = oracle.infer(base, pos);
                if forms.is_empty() {
                    outcome.oracle_skips += 1;
                    continue;
                }
                for form in forms {
                    let form = form.trim();
                    if form.is_empty()
                        || form == base.as_str()
                        || all_forms.contains(form)
                        || exclude.contains(form)
                        || generated.contains(form)
                    {
                        continue;
                    }
                    if !guard.try_claim(form) {
                        outcome.duplicate_claims += 1;
                        continue;
                    }
                    generated.insert(form.to_string());
                    outcome
                        .edges
                        .push(Edge::new(base.clone(), form, EdgeSource::RegularInflection));
                }
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    outcome
}
