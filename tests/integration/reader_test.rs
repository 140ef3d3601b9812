//! Tests for the `GedcomReader` facade and its configuration switches

use crate::utils::{HOUSEHOLD, today, write_ged};
use ged_reader::{Diagnostic, GedcomReader, ReaderConfig, RuleCode, WriterSink};

#[test]
fn test_emits_sorted_diagnostics_when_configured() {
    let file = write_ged(HOUSEHOLD);
    let mut sink = WriterSink::new(Vec::new());
    let reader =
        GedcomReader::open_with_sink(file.path(), ReaderConfig::default(), today(), &mut sink)
            .unwrap();

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), reader.diagnostics().len());
    assert!(lines.contains(&"ERROR: FAMILY: US04: F2: Divorced 0280-06-01 before married 0280-06-06"));
    for (line, diagnostic) in lines.iter().zip(reader.diagnostics()) {
        assert_eq!(*line, diagnostic.to_string());
    }
}

#[test]
fn test_quiet_config_has_no_side_effects() {
    let file = write_ged(HOUSEHOLD);
    let mut sink: Vec<Diagnostic> = Vec::new();
    let reader =
        GedcomReader::open_with_sink(file.path(), ReaderConfig::quiet(), today(), &mut sink)
            .unwrap();

    assert!(sink.is_empty());
    assert!(reader.tables().is_none());
    assert!(!reader.diagnostics().is_empty());
}

#[test]
fn test_tables_built_by_default() {
    let file = write_ged(HOUSEHOLD);
    let mut sink: Vec<Diagnostic> = Vec::new();
    let reader =
        GedcomReader::open_with_sink(file.path(), ReaderConfig::default(), today(), &mut sink)
            .unwrap();

    let tables = reader.tables().unwrap();
    assert_eq!(tables.individuals.len(), 4);
    assert_eq!(tables.families.len(), 2);
    assert_eq!(tables.families[0].husband_name, "Aerys /Targaryen/");
    assert_eq!(tables.families[1].divorced, "0280-06-01");
    assert!(tables.recent_deaths.is_empty());
    assert_eq!(sink.len(), reader.diagnostics().len());
}

#[test]
fn test_json_report() {
    let file = write_ged(HOUSEHOLD);
    let reader = GedcomReader::open_at(file.path(), ReaderConfig::quiet(), today()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&reader.report().to_json().unwrap()).unwrap();
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), RuleCode::ALL.len());
    assert_eq!(json["today"], "2020-03-01");
    assert_eq!(outcomes[0]["code"], "US01");
}
