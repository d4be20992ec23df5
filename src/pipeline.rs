//! Pipeline orchestration.
//!
//! Runs the five canonicalization stages in their fixed total order, each
//! stage consuming the full merged output of the previous one. A single
//! [`DedupGuard`] spans the whole run so no form is ever claimed twice; the
//! engine itself is a pure function from an entry store (plus tables) to an
//! entry store, with all file I/O left to the caller.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cluster::resolve_clusters;
use crate::crossref::extract_cross_references;
use crate::dedup::DedupGuard;
use crate::graph::VariantGraph;
use crate::irregular::{extract_irregular_inflections, table_rows, InflectionKind};
use crate::models::{Edge, RunReport, Stage, StageReport};
use crate::regular::{generate_regular_inflections, MorphologyOracle};
use crate::store::EntryStore;
use crate::variants::{spelling_variant_edges, VariantTable};

/// The only fatal condition in the pipeline: a required table cannot be
/// read at stage start. Everything else degrades to dropped candidates.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    TableIo {
        path: PathBuf,
        source: io::Error,
    },
}

/// Read a required table file, mapping failure to the fatal pipeline error.
pub fn read_table(path: &Path) -> Result<String, PipelineError> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::TableIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Optional inputs for a run. A stage whose input is absent is skipped.
#[derive(Default)]
pub struct PipelineConfig<'a> {
    pub variants: Option<&'a VariantTable>,
    pub oracle: Option<&'a dyn MorphologyOracle>,
    pub show_progress: bool,
}

/// Everything a run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub store: EntryStore,
    pub report: RunReport,
    /// Irregular base -> plural rows collected by the noun stage.
    pub noun_table: Vec<(String, Vec<String>)>,
    /// Irregular base -> past/participle rows collected by the verb stage.
    pub verb_table: Vec<(String, Vec<String>)>,
}

/// Run all stages over `store`.
pub fn run_pipeline(mut store: EntryStore, config: &PipelineConfig) -> PipelineOutput {
    let mut guard = DedupGuard::new();
    let mut stages: Vec<StageReport> = Vec::new();
    let mut irregular_forms: HashSet<String> = HashSet::new();

    let entries_in = store.len();
    let malformed_records = store.malformed_records;
    let dropped_noise = store.dropped_noise;

    // Stage 1: cross-references.
    banner(config, Stage::CrossReferences);
    let before = store.len();
    let outcome = extract_cross_references(&mut store, &mut guard);
    let mut report = apply_edges(&mut store, Stage::CrossReferences, &outcome.edges, before);
    report.consumed_entries = outcome.consumed_entries;
    report.unresolved_targets = outcome.unresolved_targets;
    finish_banner(config, &report);
    stages.push(report);

    // Stage 2: spelling variants.
    match config.variants {
        Some(table) => {
            banner(config, Stage::SpellingVariants);
            let before = store.len();
            let outcome = spelling_variant_edges(&store, table, &mut guard);
            let mut report =
                apply_edges(&mut store, Stage::SpellingVariants, &outcome.edges, before);
            report.duplicate_claims = outcome.duplicate_claims;
            finish_banner(config, &report);
            stages.push(report);
        }
        None => skipped(config, Stage::SpellingVariants),
    }

    // Stage 3: irregular nouns.
    banner(config, Stage::IrregularNouns);
    let before = store.len();
    let outcome =
        extract_irregular_inflections(&mut store, &[InflectionKind::Plural], &mut guard);
    let noun_table = table_rows(&outcome.edges);
    irregular_forms.extend(outcome.forms);
    let mut report = apply_edges(&mut store, Stage::IrregularNouns, &outcome.edges, before);
    report.consumed_entries = outcome.consumed_entries;
    finish_banner(config, &report);
    stages.push(report);

    // Stage 4: irregular verbs.
    banner(config, Stage::IrregularVerbs);
    let before = store.len();
    let outcome = extract_irregular_inflections(
        &mut store,
        &[InflectionKind::Past, InflectionKind::PastParticiple],
        &mut guard,
    );
    let verb_table = table_rows(&outcome.edges);
    irregular_forms.extend(outcome.forms);
    let mut report = apply_edges(&mut store, Stage::IrregularVerbs, &outcome.edges, before);
    report.consumed_entries = outcome.consumed_entries;
    finish_banner(config, &report);
    stages.push(report);

    // Stage 5: regular inflections.
    match config.oracle {
        Some(oracle) => {
            banner(config, Stage::RegularInflections);
            let before = store.len();
            let outcome = generate_regular_inflections(
                &store,
                oracle,
                &irregular_forms,
                &mut guard,
                config.show_progress,
            );
            let mut report =
                apply_edges(&mut store, Stage::RegularInflections, &outcome.edges, before);
            report.duplicate_claims = outcome.duplicate_claims;
            report.oracle_skips = outcome.oracle_skips;
            finish_banner(config, &report);
            stages.push(report);
        }
        None => skipped(config, Stage::RegularInflections),
    }

    let report = RunReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries_in,
        entries_out: store.len(),
        malformed_records,
        dropped_noise,
        stages,
    };

    PipelineOutput {
        store,
        report,
        noun_table,
        verb_table,
    }
}

/// Build the stage graph and fold its clusters into the store.
fn apply_edges(
    store: &mut EntryStore,
    stage: Stage,
    edges: &[Edge],
    entries_in: usize,
) -> StageReport {
    let mut report = StageReport::new(stage);
    report.entries_in = entries_in;
    report.edges = edges.len();

    let graph = VariantGraph::from_edges(edges);
    let outcome = resolve_clusters(store, &graph);
    report.components = outcome.components;
    report.discarded_components = outcome.discarded_components;
    report.absorbed_forms = outcome.absorbed_forms;
    report.entries_out = store.len();
    report
}

fn banner(config: &PipelineConfig, stage: Stage) {
    if config.show_progress {
        eprintln!("Stage: {}...", stage.name());
    }
}

fn finish_banner(config: &PipelineConfig, report: &StageReport) {
    if config.show_progress {
        eprintln!(
            "  {} edges, {} components, {} forms absorbed, {} -> {} entries",
            report.edges,
            report.components,
            report.absorbed_forms,
            report.entries_in,
            report.entries_out
        );
    }
}

fn skipped(config: &PipelineConfig, stage: Stage) {
    if config.show_progress {
        eprintln!("Stage: {} (no table, skipped)", stage.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PartOfSpeech;
    use crate::regular::TableOracle;
    use crate::store::duplicate_keys;

    const NOUN: &str = "<i class=\"p\"><font color=\"green\">n</font></i>";

    fn plural_of(bases: &str) -> String {
        format!(
            "<div style=\"margin-left:1em\"><i class=\"p\"><font color=\"green\">pl</font></i> <i class=\"p\"><font color=\"green\">від</font></i> &lt;&lt;{}&gt;&gt;</div>",
            bases
        )
    }

    #[test]
    fn test_plural_line_merged_into_base() {
        // Scenario: `cat\tN` plus a plural line referencing cat.
        let records = format!("cat\t{} a small animal\ncats\t{}\n", NOUN, plural_of("cat"));
        let store = EntryStore::parse(&records);

        let output = run_pipeline(store, &PipelineConfig::default());
        assert_eq!(output.store.len(), 1);
        assert_eq!(output.store.entries[0].keys, vec!["cat", "cats"]);
        assert_eq!(output.noun_table, vec![("cat".to_string(), vec!["cats".to_string()])]);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let input = "alpha\tA\nbeta\tB\n";
        let store = EntryStore::parse(input);
        let output = run_pipeline(store, &PipelineConfig::default());
        assert_eq!(output.store.serialize(), input);
        assert_eq!(output.report.entries_in, 2);
        assert_eq!(output.report.entries_out, 2);
    }

    #[test]
    fn test_spelling_variant_merge_and_guard() {
        let store = EntryStore::parse("colour\tpaint\nflavour\ttaste\nflavor\tUS taste\n");
        let variants = VariantTable::parse_csv("colour,color\nflavour,flavor\n");
        let config = PipelineConfig {
            variants: Some(&variants),
            ..Default::default()
        };

        let output = run_pipeline(store, &config);
        // colour absorbs color; flavour/flavor both exist so stay separate.
        assert_eq!(output.store.entries[0].keys, vec!["colour", "color"]);
        assert_eq!(output.store.entries[1].keys, vec!["flavour"]);
        assert_eq!(output.store.entries[2].keys, vec!["flavor"]);
        assert!(duplicate_keys(&output.store).is_empty());
    }

    #[test]
    fn test_generated_form_never_collides_with_headword() {
        // Scenario: regular plural of "new" would be "news", which already
        // exists as an unrelated entry.
        let records = format!("new\t{} fresh\nnews\t{} tidings\n", NOUN, NOUN);
        let store = EntryStore::parse(&records);
        let oracle = TableOracle::new().with_csv(PartOfSpeech::Noun, "new,news\nnews,newses\n");
        let config = PipelineConfig {
            oracle: Some(&oracle),
            ..Default::default()
        };

        let output = run_pipeline(store, &config);
        assert_eq!(output.store.entries[0].keys, vec!["new"]);
        assert_eq!(output.store.entries[1].keys, vec!["news", "newses"]);
        assert!(duplicate_keys(&output.store).is_empty());
    }

    #[test]
    fn test_irregular_forms_excluded_from_generation() {
        // "mouse" gets its irregular plural; the oracle's "mouses" must not
        // also be generated.
        let records = format!("mouse\t{} a rodent\nmice\t{}\n", NOUN, plural_of("mouse"));
        let store = EntryStore::parse(&records);
        let oracle = TableOracle::new().with_csv(PartOfSpeech::Noun, "mouse,mouses\n");
        let config = PipelineConfig {
            oracle: Some(&oracle),
            ..Default::default()
        };

        let output = run_pipeline(store, &config);
        assert_eq!(output.store.len(), 1);
        assert_eq!(output.store.entries[0].keys, vec!["mouse", "mice"]);
    }

    #[test]
    fn test_order_preserved_across_stages() {
        let records = format!(
            "zebra\t{} stripes\ncat\t{} a small animal\ncats\t{}\n",
            NOUN,
            NOUN,
            plural_of("cat")
        );
        let store = EntryStore::parse(&records);
        let output = run_pipeline(store, &PipelineConfig::default());

        let serialized = output.store.serialize();
        let zebra_pos = serialized.find("zebra").unwrap();
        let cat_pos = serialized.find("cat|cats").unwrap();
        assert!(zebra_pos < cat_pos);
    }

    #[test]
    fn test_report_counters() {
        let records = format!("\torphan body\ncat\t{}\ncats\t{}\n", NOUN, plural_of("cat"));
        let store = EntryStore::parse(&records);
        let output = run_pipeline(store, &PipelineConfig::default());

        assert_eq!(output.report.malformed_records, 1);
        assert_eq!(output.report.entries_in, 2);
        assert_eq!(output.report.entries_out, 1);
        // No variant table was configured, so the spelling stage is absent.
        let nouns = &output.report.stages[1];
        assert_eq!(nouns.stage, Stage::IrregularNouns);
        assert_eq!(nouns.edges, 1);
        assert_eq!(nouns.consumed_entries, 1);
        assert_eq!(nouns.absorbed_forms, 1);
    }

    #[test]
    fn test_read_table_missing_is_fatal() {
        let err = read_table(Path::new("/nonexistent/lexmerge-table.csv")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("lexmerge-table.csv"));
    }
}
