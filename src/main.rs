//! Lexmerge Headword Canonicalization Pipeline
//!
//! Merges morphological and spelling variants of dictionary headwords into
//! single canonical entries while preserving input order.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lexmerge::models::PartOfSpeech;
use lexmerge::output::{
    print_stats, print_summary, print_validation, write_inflection_table_file,
    write_records_file, write_report_file,
};
use lexmerge::pipeline::{read_table, run_pipeline, PipelineConfig};
use lexmerge::regular::{MorphologyOracle, TableOracle};
use lexmerge::store::EntryStore;
use lexmerge::variants::VariantTable;

#[derive(Parser)]
#[command(name = "lexmerge")]
#[command(about = "Variant clustering and canonicalization for dictionary headwords")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full canonicalization pipeline over a corpus
    ///
    /// Stages run in fixed order: cross-references, spelling variants,
    /// irregular nouns, irregular verbs, regular inflections. A stage whose
    /// table is not supplied is skipped.
    Run {
        /// Input corpus (`keys<TAB>body` records)
        #[arg(long)]
        input: PathBuf,

        /// Output path for the canonicalized corpus
        #[arg(long)]
        output: PathBuf,

        /// British,American spelling-variant CSV
        #[arg(long)]
        variants: Option<PathBuf>,

        /// Raw varcon word list (alternative to --variants)
        #[arg(long)]
        varcon: Option<PathBuf>,

        /// Regular noun forms CSV (`base,plural`)
        #[arg(long)]
        noun_forms: Option<PathBuf>,

        /// Regular adjective forms CSV (`base,comparative,superlative`)
        #[arg(long)]
        adjective_forms: Option<PathBuf>,

        /// Regular verb forms CSV (`base,past,participle,gerund,third`)
        #[arg(long)]
        verb_forms: Option<PathBuf>,

        /// Write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Directory to write extracted irregular-inflection tables into
        #[arg(long)]
        emit_tables: Option<PathBuf>,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Check a corpus for repeated headwords and empty bodies
    Validate {
        /// Corpus to check
        #[arg(long)]
        input: PathBuf,
    },

    /// Show corpus size statistics
    Stats {
        /// Corpus to inspect
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            variants,
            varcon,
            noun_forms,
            adjective_forms,
            verb_forms,
            report,
            emit_tables,
            quiet,
        } => {
            let corpus = read_table(&input)?;
            let store = EntryStore::parse(&corpus);

            // --variants takes precedence over --varcon when both are given.
            let variant_table = match (&variants, &varcon) {
                (Some(path), _) => Some(VariantTable::parse_csv(&read_table(path)?)),
                (None, Some(path)) => Some(VariantTable::parse_varcon(&read_table(path)?)),
                (None, None) => None,
            };

            let mut oracle = TableOracle::new();
            if let Some(path) = &noun_forms {
                oracle = oracle.with_csv(PartOfSpeech::Noun, &read_table(path)?);
            }
            if let Some(path) = &adjective_forms {
                oracle = oracle.with_csv(PartOfSpeech::Adjective, &read_table(path)?);
            }
            if let Some(path) = &verb_forms {
                oracle = oracle.with_csv(PartOfSpeech::Verb, &read_table(path)?);
            }
            let oracle = if oracle.is_empty() { None } else { Some(oracle) };

            let config = PipelineConfig {
                variants: variant_table.as_ref(),
                oracle: oracle
                    .as_ref()
                    .map(|o| o as &dyn MorphologyOracle),
                show_progress: !quiet,
            };

            let result = run_pipeline(store, &config);

            write_records_file(&result.store, &output)?;

            if let Some(dir) = &emit_tables {
                std::fs::create_dir_all(dir)?;
                write_inflection_table_file(&result.noun_table, &dir.join("nouns-irregular.csv"))?;
                write_inflection_table_file(&result.verb_table, &dir.join("verbs-irregular.csv"))?;
                if !quiet {
                    eprintln!("Tables written to: {}", dir.display());
                }
            }

            if let Some(path) = &report {
                write_report_file(&result.report, path)?;
                if !quiet {
                    eprintln!("Report written to: {}", path.display());
                }
            }

            if !quiet {
                print_summary(&result.report);
                eprintln!("\nOutput: {}", output.display());
            }
        }

        Commands::Validate { input } => {
            let corpus = read_table(&input)?;
            let store = EntryStore::parse(&corpus);
            if !print_validation(&store) {
                std::process::exit(1);
            }
        }

        Commands::Stats { input } => {
            let corpus = read_table(&input)?;
            let store = EntryStore::parse(&corpus);
            print_stats(&store);
        }
    }

    Ok(())
}
