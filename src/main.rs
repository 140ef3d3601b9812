use anyhow::Context;
use clap::Parser;
use ged_reader::utils::logging::print_table;
use ged_reader::summary::{FamilyRow, IndividualRow, RecentDeathRow, SurvivorRow, SummaryTables};
use ged_reader::{GedcomReader, ReaderConfig, Severity, WriterSink};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

fn print_tables(tables: &SummaryTables) {
    print_table(
        "Individuals",
        &IndividualRow::HEADERS,
        &tables.individuals.iter().map(IndividualRow::cells).collect::<Vec<_>>(),
    );
    print_table(
        "Families",
        &FamilyRow::HEADERS,
        &tables.families.iter().map(FamilyRow::cells).collect::<Vec<_>>(),
    );
    print_table(
        "Recent Deaths",
        &RecentDeathRow::HEADERS,
        &tables.recent_deaths.iter().map(RecentDeathRow::cells).collect::<Vec<_>>(),
    );
    print_table(
        "Recent Survivors",
        &SurvivorRow::HEADERS,
        &tables.recent_survivors.iter().map(SurvivorRow::cells).collect::<Vec<_>>(),
    );
}

/// Read a GEDCOM file, print its summary tables and audit it against the rule catalogue
#[derive(Parser, Debug)]
#[command(name = "ged-reader", version, about, long_about = None)]
struct Args {
    /// GEDCOM file to read
    path: PathBuf,

    /// Print the rule report as JSON instead of tables and diagnostic lines
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { path, json } = Args::parse();

    let start = Instant::now();
    // Tables are printed before the diagnostics, so emission is done here
    let config = ReaderConfig {
        emit_diagnostics: false,
        ..ReaderConfig::default()
    };
    let reader = GedcomReader::open(&path, config)
        .with_context(|| format!("Failed to read GEDCOM file {}", path.display()))?;

    if json {
        println!("{}", reader.report().to_json().context("Failed to serialize report")?);
    } else {
        if let Some(tables) = reader.tables() {
            print_tables(tables);
        }
        reader
            .emit(&mut WriterSink::stdout())
            .context("Failed to write diagnostics")?;
    }

    let counts = reader.report().count_by_severity();
    let count = |severity: Severity| counts.get(&severity).copied().unwrap_or(0);
    info!(
        "Processed {} in {:?}: {} errors, {} warnings, {} listings",
        path.display(),
        start.elapsed(),
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info)
    );
    Ok(())
}
