//! Global dedup guard.
//!
//! Tracks every form already bound to a canonical entry across the whole run
//! so that no inflected form is ever claimed twice. The guard is an explicit
//! value owned by the pipeline and passed into each adapter; a fresh run
//! constructs a fresh guard.

use std::collections::HashSet;

/// The process-wide set of claimed forms. Accumulates monotonically within a
/// run.
#[derive(Debug, Default)]
pub struct DedupGuard {
    used: HashSet<String>,
}

impl DedupGuard {
    pub fn new() -> Self {
        DedupGuard::default()
    }

    /// Speculative claim, used by the spelling-variant and regular-inflection
    /// adapters. Returns false if the form is already bound elsewhere; the
    /// caller drops the edge and counts a DuplicateClaim.
    pub fn try_claim(&mut self, form: &str) -> bool {
        if self.used.contains(form) {
            return false;
        }
        self.used.insert(form.to_string());
        true
    }

    /// Authoritative claim, used by the cross-reference and
    /// irregular-inflection adapters. These encode asserted lexical
    /// relations, so the form is recorded unconditionally.
    pub fn assert_claim(&mut self, form: &str) {
        self.used.insert(form.to_string());
    }

    pub fn is_used(&self, form: &str) -> bool {
        self.used.contains(form)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
