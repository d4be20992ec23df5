//! Lexmerge Headword Canonicalization Library
//!
//! Merges morphological and spelling variants of dictionary headwords
//! (plurals, past tenses, British/American spellings, cross-references,
//! generated regular inflections) into single canonical entries, preserving
//! input order and guaranteeing that no inflected form is claimed by more
//! than one entry.
//!
//! # Example
//!
//! ```
//! use lexmerge::prelude::*;
//!
//! let store = EntryStore::parse("colour\tpaint or pigment\n");
//! let variants = VariantTable::parse_csv("colour,color\n");
//!
//! let config = PipelineConfig {
//!     variants: Some(&variants),
//!     ..Default::default()
//! };
//! let output = run_pipeline(store, &config);
//!
//! assert_eq!(output.store.entries[0].keys, vec!["colour", "color"]);
//! ```

pub mod cluster;
pub mod crossref;
pub mod dedup;
pub mod graph;
pub mod irregular;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod regular;
pub mod store;
pub mod variants;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cluster::{resolve_clusters, ResolveOutcome};
    pub use crate::crossref::{cross_reference_target, extract_cross_references, CrossRefOutcome};
    pub use crate::dedup::DedupGuard;
    pub use crate::graph::VariantGraph;
    pub use crate::irregular::{
        extract_irregular_inflections, irregular_bases, parse_table, table_rows, InflectionKind,
        IrregularOutcome,
    };
    pub use crate::models::{
        Edge, EdgeSource, Entry, PartOfSpeech, RunReport, Stage, StageReport,
    };
    pub use crate::output::{
        print_stats, print_summary, print_validation, write_inflection_table,
        write_inflection_table_file, write_records, write_records_file, write_report,
        write_report_file, OutputError,
    };
    pub use crate::pipeline::{
        read_table, run_pipeline, PipelineConfig, PipelineError, PipelineOutput,
    };
    pub use crate::regular::{
        generate_regular_inflections, MorphologyOracle, RegularOutcome, TableOracle,
    };
    pub use crate::store::{duplicate_keys, keys_with_empty_body, EntryStore};
    pub use crate::variants::{spelling_variant_edges, VariantOutcome, VariantTable};
}

// Re-export commonly used types at the crate root
pub use models::{Edge, EdgeSource, Entry, RunReport};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineOutput};
pub use store::EntryStore;
