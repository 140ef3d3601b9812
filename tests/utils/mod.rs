use std::io::Write;

use chrono::NaiveDate;
use ged_reader::{GedcomReader, ReaderConfig};
use tempfile::NamedTempFile;

/// Fixed evaluation date shared by the integration tests
#[must_use]
pub fn today() -> NaiveDate {
    ymd(2020, 3, 1)
}

#[must_use]
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Write GEDCOM text to a temporary `.ged` file
pub fn write_ged(text: &str) -> NamedTempFile {
    write_ged_bytes(text.as_bytes())
}

/// Write raw bytes, not necessarily UTF-8, to a temporary `.ged` file
pub fn write_ged_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ged")
        .tempfile()
        .expect("create temp file");
    file.write_all(bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

/// Open GEDCOM text without side effects
pub fn open_quiet(text: &str) -> GedcomReader {
    let file = write_ged(text);
    GedcomReader::open_at(file.path(), ReaderConfig::quiet(), today()).expect("open fixture")
}

/// A family `id` with `count` children, all individuals included
#[must_use]
pub fn family_with_children(id: &str, count: usize) -> String {
    let mut text = format!("0 @{id}H@ INDI\n1 NAME Father /{id}/\n1 SEX M\n1 FAMS @{id}@\n");
    text.push_str(&format!("0 @{id}W@ INDI\n1 NAME Mother /{id}/\n1 SEX F\n1 FAMS @{id}@\n"));
    for n in 0..count {
        text.push_str(&format!(
            "0 @{id}C{n}@ INDI\n1 NAME Child{n} /{id}/\n1 SEX F\n1 BIRT\n2 DATE 01 JAN {year}\n1 FAMC @{id}@\n",
            year = 1990 + n
        ));
    }
    text.push_str(&format!("0 @{id}@ FAM\n1 HUSB @{id}H@\n1 WIFE @{id}W@\n"));
    for n in 0..count {
        text.push_str(&format!("1 CHIL @{id}C{n}@\n"));
    }
    text
}

/// A small royal household used across the tests.
///
/// F1 is consistent: married after both spouses were born and before either
/// died, no divorce. F2 divorces before it marries.
pub const HOUSEHOLD: &str = "\
0 HEAD
0 @I1@ INDI
1 NAME Aerys /Targaryen/
1 SEX M
1 BIRT
2 DATE 06 JUN 0244
1 DEAT
2 DATE 01 JAN 0283
1 FAMS @F1@
0 @I2@ INDI
1 NAME Rhaella /Targaryen/
1 SEX F
1 BIRT
2 DATE 01 JAN 0245
1 DEAT
2 DATE 01 JAN 0284
1 FAMS @F1@
0 @I3@ INDI
1 NAME Rhaegar /Targaryen/
1 SEX M
1 BIRT
2 DATE 01 JUN 0260
1 DEAT
2 DATE 01 MAY 0283
1 FAMC @F1@
1 FAMS @F2@
0 @I4@ INDI
1 NAME Elia /Martell/
1 SEX F
1 BIRT
2 DATE 01 JAN 0257
1 DEAT
2 DATE 01 JUN 0283
1 FAMS @F2@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 MARR
2 DATE 06 JUN 0259
0 @F2@ FAM
1 HUSB @I3@
1 WIFE @I4@
1 MARR
2 DATE 06 JUN 0280
1 DIV
2 DATE 01 JUN 0280
0 TRLR
";
