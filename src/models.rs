//! Data structures for the lexmerge canonicalization pipeline.

use serde::{Deserialize, Serialize};

/// A single dictionary entry.
///
/// `keys` holds every headword form this entry answers for, in first-seen
/// order with no duplicates. `body` is opaque markup that is carried through
/// unchanged. `position` is the ingestion index; it is assigned once and only
/// ever tightened to the earliest position merged into this entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub keys: Vec<String>,
    pub body: String,
    pub position: Option<usize>,
}

impl Entry {
    pub fn new(keys: Vec<String>, body: String, position: Option<usize>) -> Self {
        Entry {
            keys,
            body,
            position,
        }
    }

    /// Check whether a form is already one of this entry's keys.
    pub fn has_key(&self, form: &str) -> bool {
        self.keys.iter().any(|k| k == form)
    }

    /// Append a key if it is not already present, preserving order.
    pub fn push_key(&mut self, form: &str) -> bool {
        if self.has_key(form) {
            return false;
        }
        self.keys.push(form.to_string());
        true
    }
}

/// Which adapter produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSource {
    CrossReference,
    SpellingVariant,
    IrregularNoun,
    IrregularVerbPast,
    IrregularVerbParticiple,
    RegularInflection,
}

/// An undirected variant relation between two forms.
///
/// Edges are transient: each stage rebuilds its own set and discards it
/// after cluster resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub a: String,
    pub b: String,
    pub source: EdgeSource,
}

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>, source: EdgeSource) -> Self {
        Edge {
            a: a.into(),
            b: b.into(),
            source,
        }
    }
}

/// Part-of-speech markers recognized in entry bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Verb,
}

// The dictionary marks parts of speech with inline green-font tags.
const NOUN_TAG: &str = "<i class=\"p\"><font color=\"green\">n</font></i>";
const ADJECTIVE_TAG: &str = "<i class=\"p\"><font color=\"green\">adj</font></i>";
const VERB_TAG: &str = "<i class=\"p\"><font color=\"green\">v</font></i>";

impl PartOfSpeech {
    /// Detect whether a body carries this part-of-speech tag.
    pub fn matches(&self, body: &str) -> bool {
        body.contains(self.tag())
    }

    fn tag(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => NOUN_TAG,
            PartOfSpeech::Adjective => ADJECTIVE_TAG,
            PartOfSpeech::Verb => VERB_TAG,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Verb => "verb",
        }
    }
}

/// The five pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    CrossReferences,
    SpellingVariants,
    IrregularNouns,
    IrregularVerbs,
    RegularInflections,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::CrossReferences => "cross-references",
            Stage::SpellingVariants => "spelling-variants",
            Stage::IrregularNouns => "irregular-nouns",
            Stage::IrregularVerbs => "irregular-verbs",
            Stage::RegularInflections => "regular-inflections",
        }
    }
}

/// Per-stage accounting. Every anomaly in the pipeline degrades to a counter
/// here rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub entries_in: usize,
    pub entries_out: usize,
    pub edges: usize,
    pub components: usize,
    pub discarded_components: usize,
    pub absorbed_forms: usize,
    pub consumed_entries: usize,
    pub unresolved_targets: usize,
    pub duplicate_claims: usize,
    pub oracle_skips: usize,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        StageReport {
            stage,
            entries_in: 0,
            entries_out: 0,
            edges: 0,
            components: 0,
            discarded_components: 0,
            absorbed_forms: 0,
            consumed_entries: 0,
            unresolved_targets: 0,
            duplicate_claims: 0,
            oracle_skips: 0,
        }
    }
}

/// Full run accounting, serialized as the JSON run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub version: String,
    pub entries_in: usize,
    pub entries_out: usize,
    pub malformed_records: usize,
    pub dropped_noise: usize,
    pub stages: Vec<StageReport>,
}

impl RunReport {
    /// Total satellite forms absorbed across all stages.
    pub fn total_absorbed(&self) -> usize {
        self.stages.iter().map(|s| s.absorbed_forms).sum()
    }

    pub fn total_duplicate_claims(&self) -> usize {
        self.stages.iter().map(|s| s.duplicate_claims).sum()
    }
}
