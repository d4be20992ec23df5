//! Integration tests for lexmerge.
//!
//! These tests drive the full canonicalization pipeline end to end over
//! small synthetic corpora in the dictionary's native markup.

use lexmerge::models::PartOfSpeech;
use lexmerge::pipeline::{run_pipeline, PipelineConfig};
use lexmerge::regular::TableOracle;
use lexmerge::store::{duplicate_keys, EntryStore};
use lexmerge::variants::VariantTable;

const NOUN: &str = "<i class=\"p\"><font color=\"green\">n</font></i>";
const VERB: &str = "<i class=\"p\"><font color=\"green\">v</font></i>";

/// Body of a cross-reference line pointing at `target`.
fn see_also(target: &str) -> String {
    format!(
        "<div style=\"margin-left:1em\"><i class=\"p\"><font color=\"green\">див.</font></i> &lt;&lt;{}&gt;&gt;</div>",
        target
    )
}

/// Body of an irregular-plural line pointing at its base(s).
fn plural_of(bases: &str) -> String {
    format!(
        "<div style=\"margin-left:1em\"><i class=\"p\"><font color=\"green\">pl</font></i> <i class=\"p\"><font color=\"green\">від</font></i> &lt;&lt;{}&gt;&gt;</div>",
        bases
    )
}

/// Body of an irregular-past line pointing at its base(s).
fn past_of(bases: &str) -> String {
    format!(
        "<div style=\"margin-left:1em\"><i class=\"p\"><font color=\"green\">past</font></i> <i class=\"p\"><font color=\"green\">від</font></i> &lt;&lt;{}&gt;&gt;</div>",
        bases
    )
}

#[test]
fn test_full_pipeline_all_stages() {
    let corpus = format!(
        "cat\t{} a small animal\n\
         mouse\t{} a rodent\n\
         mice\t{}\n\
         colour\tpaint or pigment\n\
         kolour\t{}\n\
         go\t{} to move\n\
         went\t{}\n\
         walk\t{} to stroll\n",
        NOUN,
        NOUN,
        plural_of("mouse"),
        see_also("colour"),
        VERB,
        past_of("go"),
        VERB
    );
    let store = EntryStore::parse(&corpus);

    let variants = VariantTable::parse_csv("colour,color\n");
    let oracle = TableOracle::new()
        .with_csv(PartOfSpeech::Noun, "cat,cats\nmouse,mouses\n")
        .with_csv(PartOfSpeech::Verb, "go,goes,going\nwalk,walked,walking\n");

    let config = PipelineConfig {
        variants: Some(&variants),
        oracle: Some(&oracle),
        show_progress: false,
    };
    let output = run_pipeline(store, &config);

    let text = output.store.serialize();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);

    // Cross-reference: kolour absorbed into colour, line gone.
    assert!(lines.iter().any(|l| l.starts_with("colour|kolour|color\t")));
    // Irregular noun: mice merged; the base is lexically covered, so the
    // rule-generated "mouses" is suppressed.
    assert!(lines.iter().any(|l| l.starts_with("mouse|mice\t")));
    assert!(!text.contains("mouses"));
    // Irregular verb merged; "go" is likewise excluded from generation.
    assert!(lines.iter().any(|l| l.starts_with("go|went\t")));
    assert!(!text.contains("goes"));
    // Regular noun and verb forms generated for untouched bases.
    assert!(lines.iter().any(|l| l.starts_with("cat|cats\t")));
    assert!(lines.iter().any(|l| l.starts_with("walk|walked|walking\t")));

    assert!(duplicate_keys(&output.store).is_empty());
}

#[test]
fn test_global_uniqueness_across_stages() {
    // The spelling counterpart of "colour" and the generated plural of
    // "colo" both want the form "color"; only the earlier stage gets it.
    let corpus = format!("colour\tpaint\ncolo\t{} a thing\n", NOUN);
    let store = EntryStore::parse(&corpus);

    let variants = VariantTable::parse_csv("colour,color\n");
    let oracle = TableOracle::new().with_csv(PartOfSpeech::Noun, "colo,color\n");

    let config = PipelineConfig {
        variants: Some(&variants),
        oracle: Some(&oracle),
        show_progress: false,
    };
    let output = run_pipeline(store, &config);

    // The spelling stage runs first and absorbs "color" into "colour";
    // by the regular stage the form is a corpus key, so the candidate is
    // filtered before it ever reaches the guard.
    assert_eq!(output.store.entries[0].keys, vec!["colour", "color"]);
    assert_eq!(output.store.entries[1].keys, vec!["colo"]);
    assert!(duplicate_keys(&output.store).is_empty());
}

#[test]
fn test_fan_in_clones_into_both_bases() {
    let corpus = format!(
        "good\tadj great\nwell\tadv nicely\nbetter\t{}\n",
        past_of("good|well")
    );
    let store = EntryStore::parse(&corpus);
    let output = run_pipeline(store, &PipelineConfig::default());

    assert_eq!(output.store.entries[0].keys, vec!["good", "better"]);
    assert_eq!(output.store.entries[1].keys, vec!["well", "better"]);
    // The one sanctioned exception to global uniqueness.
    assert_eq!(duplicate_keys(&output.store), vec![("better".to_string(), 2)]);
}

#[test]
fn test_pipeline_idempotent_on_own_output() {
    let corpus = format!(
        "cat\t{} a small animal\ncats\t{}\ncolour\tpaint\n",
        NOUN,
        plural_of("cat")
    );
    let store = EntryStore::parse(&corpus);
    let variants = VariantTable::parse_csv("colour,color\n");

    let config = PipelineConfig {
        variants: Some(&variants),
        ..Default::default()
    };
    let first = run_pipeline(store, &config);
    let first_text = first.store.serialize();

    // Feed the merged output straight back in with the same tables.
    let second = run_pipeline(EntryStore::parse(&first_text), &config);
    assert_eq!(second.store.serialize(), first_text);
}

#[test]
fn test_order_preserved_for_unconnected_entries() {
    let corpus = format!(
        "zebra\t{} stripes\nape\t{} no tail\napes\t{}\n",
        NOUN,
        NOUN,
        plural_of("ape")
    );
    let store = EntryStore::parse(&corpus);
    let output = run_pipeline(store, &PipelineConfig::default());

    let text = output.store.serialize();
    assert!(text.find("zebra").unwrap() < text.find("ape|apes").unwrap());
}

#[test]
fn test_unresolved_cross_reference_survives() {
    let corpus = format!("stray\t{}\ncat\t{} a small animal\n", see_also("vanished"), NOUN);
    let store = EntryStore::parse(&corpus);
    let output = run_pipeline(store, &PipelineConfig::default());

    assert_eq!(output.store.len(), 2);
    assert_eq!(output.report.stages[0].unresolved_targets, 1);
    assert!(output.store.serialize().contains("stray"));
}

#[test]
fn test_emitted_irregular_tables() {
    let corpus = format!(
        "mouse\t{} a rodent\nmice\t{}\ngo\t{} to move\nwent\t{}\n",
        NOUN,
        plural_of("mouse"),
        VERB,
        past_of("go")
    );
    let store = EntryStore::parse(&corpus);
    let output = run_pipeline(store, &PipelineConfig::default());

    assert_eq!(
        output.noun_table,
        vec![("mouse".to_string(), vec!["mice".to_string()])]
    );
    assert_eq!(
        output.verb_table,
        vec![("go".to_string(), vec!["went".to_string()])]
    );
}

#[test]
fn test_report_accounts_for_every_stage() {
    let corpus = format!("cat\t{} a small animal\n", NOUN);
    let store = EntryStore::parse(&corpus);

    let variants = VariantTable::parse_csv("colour,color\n");
    let oracle = TableOracle::new().with_csv(PartOfSpeech::Noun, "cat,cats\n");
    let config = PipelineConfig {
        variants: Some(&variants),
        oracle: Some(&oracle),
        show_progress: false,
    };

    let output = run_pipeline(store, &config);
    assert_eq!(output.report.stages.len(), 5);
    assert_eq!(output.report.total_absorbed(), 1);
    assert_eq!(output.report.entries_in, 1);
    assert_eq!(output.report.entries_out, 1);
}
