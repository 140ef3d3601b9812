//! Tests for loading GEDCOM files into a genealogy
//!
//! These go through real files on disk, so they also cover the line reader
//! and the error paths for unreadable sources.

use crate::utils::{HOUSEHOLD, open_quiet, today, write_ged, write_ged_bytes, ymd};
use ged_reader::{GedDate, GedcomError, GedcomReader, ReaderConfig, Sex, load_gedcom};

#[test]
fn test_load_household() {
    let file = write_ged(HOUSEHOLD);
    let genealogy = load_gedcom(file.path(), today()).unwrap();

    assert_eq!(genealogy.individuals.count(), 4);
    assert_eq!(genealogy.families.count(), 2);

    let rhaegar = genealogy.individual("I3").unwrap();
    assert_eq!(rhaegar.display_name(), "Rhaegar /Targaryen/");
    assert_eq!(rhaegar.sex, Sex::Male);
    assert_eq!(rhaegar.birth, GedDate::Valid(ymd(260, 6, 1)));
    assert_eq!(rhaegar.child_of.as_deref(), Some("F1"));
    assert!(rhaegar.spouse_of.contains("F2"));
    assert!(!rhaegar.alive);
    assert_eq!(rhaegar.age, Some(22));

    let f2 = genealogy.family("F2").unwrap();
    assert_eq!(genealogy.name_of(f2.wife.as_deref()), "Elia /Martell/");
    assert_eq!(f2.divorce, GedDate::Valid(ymd(280, 6, 1)));
}

#[test]
fn test_alive_flag_follows_death_and_birth() {
    let reader = open_quiet(
        "0 @I1@ INDI\n1 BIRT\n2 DATE 01 JAN 1990\n\
         0 @I2@ INDI\n1 BIRT\n2 DATE 01 JAN 1990\n1 DEAT\n2 DATE 01 JAN 2000\n\
         0 @I3@ INDI\n1 BIRT\n2 DATE 32 JAN 1990\n\
         0 @I4@ INDI\n1 DEAT\n2 DATE 99 XYZ 2000\n",
    );

    for individual in reader.individuals() {
        let expected = match individual.id.as_str() {
            "I1" => true,
            "I2" | "I3" | "I4" => false,
            other => panic!("unexpected individual {other}"),
        };
        assert_eq!(individual.alive, expected, "{}", individual.id);
    }
}

#[test]
fn test_age_on_birthday_boundary() {
    let text = "0 @I1@ INDI\n1 BIRT\n2 DATE 25 FEB 2017\n";
    let file = write_ged(text);

    let before = load_gedcom(file.path(), ymd(2020, 2, 24)).unwrap();
    assert_eq!(before.individual("I1").unwrap().age, Some(2));

    let on = load_gedcom(file.path(), ymd(2020, 2, 25)).unwrap();
    assert_eq!(on.individual("I1").unwrap().age, Some(3));
}

#[test]
fn test_age_at_death() {
    let reader = open_quiet("0 @I1@ INDI\n1 BIRT\n2 DATE 01 APR 1960\n1 DEAT\n2 DATE 02 FEB 2004\n");
    assert_eq!(reader.genealogy().individual("I1").unwrap().age, Some(43));
}

#[test]
fn test_duplicate_identifier_keeps_first_declaration() {
    let reader = open_quiet(
        "0 @I1@ INDI\n1 NAME Jaehaerys /Targaryen/\n\
         0 @I2@ INDI\n1 NAME Alysanne /Targaryen/\n1 SEX F\n\
         0 @I2@ INDI\n1 NAME Impostor /Blackfyre/\n1 SEX M\n1 BIRT\n2 DATE 01 JAN 0200\n1 FAMS @F1@\n",
    );

    let survivor = reader.genealogy().individual("I2").unwrap();
    assert_eq!(survivor.display_name(), "Alysanne /Targaryen/");
    assert_eq!(survivor.sex, Sex::Female);
    assert_eq!(survivor.birth, GedDate::Missing);
    assert!(survivor.spouse_of.is_empty());

    assert_eq!(reader.duplicate_ids().len(), 1);
    assert_eq!(reader.duplicate_ids()[0].id, "I2");
}

#[test]
fn test_malformed_date_is_recorded_verbatim() {
    let reader = open_quiet("0 @I1@ INDI\n1 NAME Jon /Snow/\n1 BIRT\n2 DATE 35 NOV 0290\n");

    let jon = reader.genealogy().individual("I1").unwrap();
    assert_eq!(jon.birth, GedDate::Invalid("35 NOV 0290".to_string()));
    assert_eq!(jon.birth.to_string(), "INVALID");

    let dates = reader.illegitimate_dates();
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].raw, "35 NOV 0290");
    assert_eq!(dates[0].owner, "I1");
}

#[test]
fn test_level0_line_interrupts_date_context() {
    let reader = open_quiet(
        "0 @F1@ FAM\n1 MARR\n0 TRLR\n2 DATE 01 JAN 1990\n\
         0 @I1@ INDI\n1 DEAT\n0 HEAD\n2 DATE 01 JAN 2000\n",
    );

    assert_eq!(reader.genealogy().family("F1").unwrap().marriage, GedDate::Missing);
    assert_eq!(reader.genealogy().individual("I1").unwrap().death, GedDate::Missing);
    assert!(reader.individuals().iter().all(|individual| individual.alive));
}

#[test]
fn test_non_utf8_line_does_not_abort_load() {
    let file = write_ged_bytes(
        b"0 @I1@ INDI\n1 NAME Ren\xe9e /Dupont/\n1 SEX F\n1 BIRT\n2 DATE 01 JAN 1990\n\
          0 @I2@ INDI\n1 NAME Paul /Dupont/\n1 SEX M\n",
    );
    let genealogy = load_gedcom(file.path(), today()).unwrap();

    assert_eq!(genealogy.individuals.count(), 2);
    let renee = genealogy.individual("I1").unwrap();
    assert!(renee.display_name().starts_with("Ren"));
    assert!(renee.display_name().ends_with("e /Dupont/"));
    assert_eq!(renee.sex, Sex::Female);
    assert_eq!(renee.birth, GedDate::Valid(ymd(1990, 1, 1)));
    assert_eq!(genealogy.individual("I2").unwrap().sex, Sex::Male);
}

#[test]
fn test_missing_file_is_fatal() {
    let err = GedcomReader::open_at("/definitely/not/here.ged", ReaderConfig::quiet(), today())
        .unwrap_err();
    assert!(matches!(err, GedcomError::Io { .. }));
    assert_eq!(err.path().to_str(), Some("/definitely/not/here.ged"));
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_gedcom(dir.path(), today()).unwrap_err();
    assert!(matches!(err, GedcomError::NotAFile { .. }));
}
