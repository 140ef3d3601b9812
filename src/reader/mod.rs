//! Module for reading GEDCOM files and evaluating them.
//!
//! [`GedcomReader`] ties the pipeline together: load the file, derive ages and
//! alive flags, build the summary tables, run the rule catalogue and, when
//! configured, emit the diagnostics through a sink.

pub mod lines;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::info;

use crate::algorithm::{RuleEngine, RuleReport};
use crate::collections::genealogy::{DuplicateId, IllegitimateDate};
use crate::collections::{FamilyCollection, Genealogy, IndividualCollection};
use crate::config::ReaderConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, RuleCode, WriterSink};
use crate::error::{GedcomError, Result};
use crate::loader::load_gedcom;
use crate::summary::SummaryTables;

/// A loaded and evaluated GEDCOM file
#[derive(Debug, Clone)]
pub struct GedcomReader {
    path: PathBuf,
    today: NaiveDate,
    genealogy: Genealogy,
    report: RuleReport,
    tables: Option<SummaryTables>,
}

impl GedcomReader {
    /// Open a file and evaluate it as of the local calendar date.
    ///
    /// `today` is read once, so every rule of the run shares it.
    pub fn open(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        Self::open_at(path, config, Local::now().date_naive())
    }

    /// Open a file and evaluate it as of `today`, emitting to stdout when configured
    pub fn open_at(path: impl AsRef<Path>, config: ReaderConfig, today: NaiveDate) -> Result<Self> {
        Self::open_with_sink(path, config, today, &mut WriterSink::stdout())
    }

    /// Open a file and evaluate it as of `today`, emitting to `sink` when configured
    pub fn open_with_sink<S: DiagnosticSink>(
        path: impl AsRef<Path>,
        config: ReaderConfig,
        today: NaiveDate,
        sink: &mut S,
    ) -> Result<Self> {
        let path = path.as_ref();
        let genealogy = load_gedcom(path, today)?;
        let reader = Self::evaluate(path, genealogy, config, today);

        if config.emit_diagnostics {
            reader
                .emit(sink)
                .map_err(|e| GedcomError::io(path, "Failed to emit diagnostics", e))?;
        }
        Ok(reader)
    }

    /// Evaluate an already loaded genealogy. Nothing is emitted.
    #[must_use]
    pub fn from_genealogy(genealogy: Genealogy, config: ReaderConfig, today: NaiveDate) -> Self {
        Self::evaluate(Path::new("<memory>"), genealogy, config, today)
    }

    fn evaluate(path: &Path, genealogy: Genealogy, config: ReaderConfig, today: NaiveDate) -> Self {
        let tables = config
            .build_tables
            .then(|| SummaryTables::build(&genealogy, today));
        let report = RuleEngine::new().evaluate(&genealogy, today);
        info!(
            "{}: {} individuals, {} families, {} diagnostics",
            path.display(),
            genealogy.individuals.count(),
            genealogy.families.count(),
            report.diagnostics().len()
        );

        Self {
            path: path.to_path_buf(),
            today,
            genealogy,
            report,
            tables,
        }
    }

    /// Write every diagnostic, in report order, to `sink`
    pub fn emit<S: DiagnosticSink>(&self, sink: &mut S) -> std::io::Result<()> {
        sink.emit_all(self.report.diagnostics())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Evaluation date of this run
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub const fn genealogy(&self) -> &Genealogy {
        &self.genealogy
    }

    #[must_use]
    pub const fn individuals(&self) -> &IndividualCollection {
        &self.genealogy.individuals
    }

    #[must_use]
    pub const fn families(&self) -> &FamilyCollection {
        &self.genealogy.families
    }

    #[must_use]
    pub const fn report(&self) -> &RuleReport {
        &self.report
    }

    /// All diagnostics, sorted
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.report.diagnostics()
    }

    /// Flagged identifiers of one rule
    #[must_use]
    pub fn flagged(&self, code: RuleCode) -> &[String] {
        self.report.flagged(code)
    }

    /// Unparsable dates, raw text verbatim, in encounter order
    #[must_use]
    pub fn illegitimate_dates(&self) -> &[IllegitimateDate] {
        self.genealogy.illegitimate_dates()
    }

    /// Redeclared identifiers, in encounter order
    #[must_use]
    pub fn duplicate_ids(&self) -> &[DuplicateId] {
        self.genealogy.duplicate_ids()
    }

    /// Summary tables; `None` when the configuration disabled them
    #[must_use]
    pub const fn tables(&self) -> Option<&SummaryTables> {
        self.tables.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_str;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
    }

    #[test]
    fn test_from_genealogy_respects_table_flag() {
        let text = "0 @I1@ INDI\n1 NAME Jon /Snow/\n1 BIRT\n2 DATE 35 NOV 0290\n";
        let genealogy = load_from_str(text, today()).unwrap();

        let quiet = GedcomReader::from_genealogy(genealogy.clone(), ReaderConfig::quiet(), today());
        assert!(quiet.tables().is_none());
        assert_eq!(quiet.flagged(RuleCode::Us42), ["I1"]);
        assert_eq!(quiet.illegitimate_dates()[0].raw, "35 NOV 0290");

        let full = GedcomReader::from_genealogy(genealogy, ReaderConfig::default(), today());
        assert_eq!(full.tables().map(|t| t.individuals.len()), Some(1));
    }

    #[test]
    fn test_emit_to_vec_sink() {
        let text = "0 @I1@ INDI\n1 BIRT\n2 DATE 01 JAN 2030\n";
        let genealogy = load_from_str(text, today()).unwrap();
        let reader = GedcomReader::from_genealogy(genealogy, ReaderConfig::quiet(), today());

        let mut collected: Vec<Diagnostic> = Vec::new();
        reader.emit(&mut collected).unwrap();
        assert_eq!(collected, reader.diagnostics());
        assert!(collected.iter().any(|d| d.code == RuleCode::Us01));
    }
}
