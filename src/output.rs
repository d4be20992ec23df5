//! Output formatting for canonicalized corpora and run reports.

use crate::models::RunReport;
use crate::store::{duplicate_keys, keys_with_empty_body, EntryStore};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the corpus in the `keys<TAB>body` record shape.
pub fn write_records<W: Write>(store: &EntryStore, writer: &mut W) -> Result<(), OutputError> {
    writer.write_all(store.serialize().as_bytes())?;
    Ok(())
}

/// Write the corpus to a file.
pub fn write_records_file(store: &EntryStore, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_records(store, &mut file)
}

/// Write the run report as JSON.
pub fn write_report<W: Write>(report: &RunReport, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write the run report as JSON to a file.
pub fn write_report_file(report: &RunReport, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_report(report, &mut file)
}

/// Write an irregular-inflection table as `base,variant…` CSV rows.
pub fn write_inflection_table<W: Write>(
    rows: &[(String, Vec<String>)],
    writer: &mut W,
) -> Result<(), OutputError> {
    for (base, variants) in rows {
        writeln!(writer, "{},{}", base, variants.join(","))?;
    }
    Ok(())
}

/// Write an irregular-inflection table to a file.
pub fn write_inflection_table_file(
    rows: &[(String, Vec<String>)],
    path: &Path,
) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_inflection_table(rows, &mut file)
}

/// Write a run summary to stdout.
pub fn print_summary(report: &RunReport) {
    println!("\n=== Run Summary ===");
    println!("Version: {}", report.version);
    println!();
    println!("Entries: {} -> {}", report.entries_in, report.entries_out);
    println!("Malformed records skipped: {}", report.malformed_records);
    println!("Noise lines dropped: {}", report.dropped_noise);
    println!();
    println!("Stages:");
    for stage in &report.stages {
        println!(
            "  {}: {} edges, {} components ({} discarded), {} forms absorbed",
            stage.stage.name(),
            stage.edges,
            stage.components,
            stage.discarded_components,
            stage.absorbed_forms
        );
        if stage.consumed_entries > 0 {
            println!("    consumed lines: {}", stage.consumed_entries);
        }
        if stage.unresolved_targets > 0 {
            println!("    unresolved cross-references: {}", stage.unresolved_targets);
        }
        if stage.duplicate_claims > 0 {
            println!("    duplicate claims dropped: {}", stage.duplicate_claims);
        }
        if stage.oracle_skips > 0 {
            println!("    bases skipped by oracle: {}", stage.oracle_skips);
        }
    }
    println!();
    println!("Total forms absorbed: {}", report.total_absorbed());
}

/// Print uniqueness and completeness findings for a corpus. Returns true
/// when the corpus is clean.
pub fn print_validation(store: &EntryStore) -> bool {
    let repeated = duplicate_keys(store);
    let empty = keys_with_empty_body(store);

    if !repeated.is_empty() {
        println!("Repeated headwords: {}", repeated.len());
        for (form, count) in &repeated {
            println!("  {}: {}", form, count);
        }
    }

    if !empty.is_empty() {
        println!("\nKeys with empty body:");
        for key in &empty {
            println!("  {}", key);
        }
    }

    if repeated.is_empty() && empty.is_empty() {
        println!("OK: no repeated headwords, no empty bodies.");
        true
    } else {
        false
    }
}

/// Print corpus size statistics.
pub fn print_stats(store: &EntryStore) {
    println!("Lines in file: {}", store.len());
    println!("Words in dictionary: {}", store.form_count());
}
