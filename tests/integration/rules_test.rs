//! Tests for the rule catalogue evaluated end to end
//!
//! Each test loads a file and checks flagged identifiers and diagnostics of
//! the rules involved.

use crate::utils::{HOUSEHOLD, family_with_children, open_quiet, today};
use ged_reader::{EntityKind, RuleCode, RuleEngine, Severity};

#[test]
fn test_household_marriage_and_death_ordering_is_clean() {
    let reader = open_quiet(HOUSEHOLD);

    for code in [RuleCode::Us02, RuleCode::Us05, RuleCode::Us06] {
        assert!(reader.flagged(code).is_empty(), "{code} flagged");
    }
    assert_eq!(reader.flagged(RuleCode::Us29), ["I1", "I2", "I3", "I4"]);
}

#[test]
fn test_divorce_before_marriage_once_per_family() {
    let mut text = HOUSEHOLD.replace("0 TRLR\n", "");
    text.push_str("0 @F3@ FAM\n1 MARR\n2 DATE 10 OCT 1990\n1 DIV\n2 DATE 09 OCT 1990\n");
    text.push_str("0 @F4@ FAM\n1 MARR\n2 DATE 10 OCT 1990\n1 DIV\n2 DATE 10 OCT 1991\n");
    let reader = open_quiet(&text);

    let diagnostics = reader.report().diagnostics_for(RuleCode::Us04);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(reader.flagged(RuleCode::Us04), ["F2", "F3"]);
    assert_eq!(
        diagnostics[0].to_string(),
        "ERROR: FAMILY: US04: F2: Divorced 0280-06-01 before married 0280-06-06"
    );
}

#[test]
fn test_sixteen_children_trip_sibling_cap() {
    let mut text = family_with_children("F1", 16);
    text.push_str(&family_with_children("F2", 14));
    let reader = open_quiet(&text);

    assert_eq!(reader.flagged(RuleCode::Us15), ["F1"]);
    let diagnostic = &reader.report().diagnostics_for(RuleCode::Us15)[0];
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.entity, EntityKind::Family);
}

/// Two-child family `id` whose children are born on `first` and `second`
fn siblings_born(id: &str, first: &str, second: &str) -> String {
    let mut text = String::new();
    for (n, birth) in [first, second].into_iter().enumerate() {
        text.push_str(&format!(
            "0 @{id}C{n}@ INDI\n1 NAME Child{n} /{id}/\n1 BIRT\n2 DATE {birth}\n1 FAMC @{id}@\n"
        ));
    }
    text.push_str(&format!("0 @{id}@ FAM\n1 CHIL @{id}C0@\n1 CHIL @{id}C1@\n"));
    text
}

#[test]
fn test_sibling_spacing_boundaries() {
    let text = [
        siblings_born("F1", "01 JAN 2000", "01 SEP 2000"),
        siblings_born("F2", "01 JAN 2000", "31 AUG 2000"),
        siblings_born("F3", "01 JAN 2000", "03 JAN 2000"),
        siblings_born("F4", "01 JAN 2000", "02 JAN 2000"),
    ]
    .concat();
    let reader = open_quiet(&text);

    // Exactly eight months apart and one day apart are both fine
    assert_eq!(reader.flagged(RuleCode::Us13), ["F2C0", "F2C1", "F3C0", "F3C1"]);
    assert!(
        reader
            .report()
            .diagnostics_for(RuleCode::Us13)
            .iter()
            .all(|d| d.severity == Severity::Warning)
    );
}

#[test]
fn test_ingestion_anomalies_become_diagnostics() {
    let reader = open_quiet(
        "0 @I2@ INDI\n1 NAME First /One/\n0 @I2@ INDI\n1 NAME Second /One/\n\
         0 @I5@ INDI\n1 DEAT\n2 DATE 35 NOV 0290\n",
    );

    assert_eq!(reader.flagged(RuleCode::Us22), ["I2"]);
    assert_eq!(reader.flagged(RuleCode::Us42), ["I5"]);
    assert!(reader.report().has_errors());
}

#[test]
fn test_invalid_dates_never_compared() {
    let reader = open_quiet(
        "0 @I1@ INDI\n1 SEX M\n1 BIRT\n2 DATE 31 FEB 2000\n1 DEAT\n2 DATE 01 JAN 1990\n1 FAMS @F1@\n\
         0 @I2@ INDI\n1 SEX F\n1 BIRT\n2 DATE 01 JAN 1950\n1 FAMS @F1@\n\
         0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 MARR\n2 DATE 00 JAN 1980\n1 DIV\n2 DATE 01 JAN 1970\n",
    );

    for code in [
        RuleCode::Us02,
        RuleCode::Us03,
        RuleCode::Us04,
        RuleCode::Us05,
        RuleCode::Us07,
        RuleCode::Us10,
    ] {
        assert!(reader.flagged(code).is_empty(), "{code} flagged");
    }
    assert_eq!(reader.flagged(RuleCode::Us42), ["F1", "I1"]);
}

#[test]
fn test_unresolved_spouse_reported_not_fatal() {
    let reader = open_quiet(
        "0 @I1@ INDI\n1 SEX M\n1 FAMS @F1@\n0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I9@\n1 MARR\n2 DATE 01 JAN 2000\n",
    );

    assert_eq!(reader.flagged(RuleCode::Us21), ["F1"]);
    assert_eq!(reader.flagged(RuleCode::Us26), ["I9"]);
    assert_eq!(reader.families().get("F1").map(|f| f.family_size()), Some(0));
}

#[test]
fn test_evaluation_is_idempotent_and_sorted() {
    let reader = open_quiet(HOUSEHOLD);
    let engine = RuleEngine::new();

    let first = engine.evaluate(reader.genealogy(), today());
    let second = engine.evaluate(reader.genealogy(), today());
    assert_eq!(first, second);
    assert_eq!(&first, reader.report());

    let codes: Vec<RuleCode> = first.diagnostics().iter().map(|d| d.code).collect();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
}
