//! GEDCOM record assembly
//!
//! Turns the classified line stream into a [`Genealogy`]. The assembler is a
//! small state machine: a level-0 `INDI` or `FAM` line opens a record, the
//! following lines are routed into it, and a `DATE` line is assigned according
//! to the date kind announced by the line right before it.

use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::collections::Genealogy;
use crate::collections::genealogy::{DuplicateId, IllegitimateDate};
use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::models::{DateKind, EntityKind, Family, GedDate, Individual, Sex, Tag};
use crate::reader::lines::{GedcomLine, GedcomLines};
use crate::utils::date::normalize_date;
use crate::utils::logging::{log_load_anomalies, log_load_complete, log_load_start};

/// Which record the following lines belong to
#[derive(Debug, Clone, PartialEq, Eq)]
enum AssemblerState {
    /// Before the first record, or after a record type we do not model
    Idle,
    BuildingIndividual(String),
    BuildingFamily(String),
    /// The current record redeclared an existing identifier; its lines are dropped
    Suppressed,
}

/// Incremental builder for a [`Genealogy`]
#[derive(Debug)]
pub struct RecordAssembler {
    genealogy: Genealogy,
    state: AssemblerState,
    /// Date kind announced by the immediately preceding line, if any
    pending_date: Option<DateKind>,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            genealogy: Genealogy::new(),
            state: AssemblerState::Idle,
            pending_date: None,
        }
    }

    /// Route one classified line
    pub fn feed(&mut self, line: &GedcomLine) {
        let tag = Tag::from(line.tag.as_str());

        if line.level_number() == Some(0) {
            self.pending_date = None;
            if tag.is_ignored_record() {
                return;
            }
            self.open_record(line);
            return;
        }

        let building = matches!(
            self.state,
            AssemblerState::BuildingIndividual(_) | AssemblerState::BuildingFamily(_)
        );
        if building {
            self.route(line, tag);
        }
        self.pending_date = match line.level_number() {
            Some(1) if building => tag.date_kind(),
            _ => None,
        };
    }

    /// Compute derived fields and hand over the finished graph
    #[must_use]
    pub fn finish(mut self, today: NaiveDate) -> Genealogy {
        self.genealogy.finalize(today);
        self.genealogy
    }

    fn open_record(&mut self, line: &GedcomLine) {
        self.pending_date = None;
        let id = strip_pointer(&line.tag);

        let kind = match line.payload.as_deref().map(Tag::from) {
            Some(Tag::Individual) => EntityKind::Individual,
            Some(Tag::Family) => EntityKind::Family,
            _ => {
                debug!("Line {}: skipping level-0 record {:?}", line.line_number, line.tag);
                self.state = AssemblerState::Idle;
                return;
            }
        };

        let created = match kind {
            EntityKind::Individual => self.genealogy.individuals.add(Individual::new(&id)),
            EntityKind::Family => self.genealogy.families.add(Family::new(&id)),
        };

        if created {
            self.state = match kind {
                EntityKind::Individual => AssemblerState::BuildingIndividual(id),
                EntityKind::Family => AssemblerState::BuildingFamily(id),
            };
        } else {
            warn!(
                "Line {}: duplicate {} identifier {id}, record ignored",
                line.line_number,
                kind.to_string().to_lowercase()
            );
            self.genealogy.record_duplicate(DuplicateId {
                kind,
                id,
                line_number: line.line_number,
            });
            self.state = AssemblerState::Suppressed;
        }
    }

    fn route(&mut self, line: &GedcomLine, tag: Tag) {
        let Some(payload) = line.payload.as_deref() else {
            return;
        };

        match line.level_number() {
            Some(1) => self.assign_field(tag, payload),
            Some(2) if tag == Tag::Date => {
                if let Some(kind) = self.pending_date {
                    self.assign_date(kind, payload, line.line_number);
                } else {
                    debug!("Line {}: DATE without a date kind, ignored", line.line_number);
                }
            }
            _ => {}
        }
    }

    fn assign_field(&mut self, tag: Tag, payload: &str) {
        match &self.state {
            AssemblerState::BuildingIndividual(id) => {
                let Some(individual) = self.genealogy.individuals.get_mut(id) else {
                    return;
                };
                match tag {
                    Tag::Name => individual.name = Some(payload.to_string()),
                    Tag::Sex => individual.sex = Sex::from(payload),
                    Tag::ChildOf => individual.child_of = Some(strip_pointer(payload)),
                    Tag::SpouseOf => {
                        individual.spouse_of.insert(strip_pointer(payload));
                    }
                    _ => {}
                }
            }
            AssemblerState::BuildingFamily(id) => {
                let Some(family) = self.genealogy.families.get_mut(id) else {
                    return;
                };
                match tag {
                    Tag::Husband => family.husband = Some(strip_pointer(payload)),
                    Tag::Wife => family.wife = Some(strip_pointer(payload)),
                    Tag::Child => {
                        family.children.insert(strip_pointer(payload));
                    }
                    _ => {}
                }
            }
            AssemblerState::Idle | AssemblerState::Suppressed => {}
        }
    }

    fn assign_date(&mut self, kind: DateKind, payload: &str, line_number: usize) {
        let (entity, owner) = match &self.state {
            AssemblerState::BuildingIndividual(id) if kind.is_individual() => {
                (EntityKind::Individual, id.clone())
            }
            AssemblerState::BuildingFamily(id) if !kind.is_individual() => {
                (EntityKind::Family, id.clone())
            }
            _ => return,
        };

        let date = normalize_date(payload);
        if date.is_invalid() {
            warn!("Line {line_number}: illegitimate {kind} date {payload:?} for {owner}");
            self.genealogy.record_illegitimate_date(IllegitimateDate {
                kind: entity,
                owner: owner.clone(),
                date_kind: kind,
                raw: payload.to_string(),
                line_number,
            });
        }

        match entity {
            EntityKind::Individual => {
                if let Some(individual) = self.genealogy.individuals.get_mut(&owner) {
                    set_individual_date(individual, kind, date);
                }
            }
            EntityKind::Family => {
                if let Some(family) = self.genealogy.families.get_mut(&owner) {
                    set_family_date(family, kind, date);
                }
            }
        }
    }
}

fn set_individual_date(individual: &mut Individual, kind: DateKind, date: GedDate) {
    match kind {
        DateKind::Birth => individual.birth = date,
        DateKind::Death => individual.death = date,
        DateKind::Marriage | DateKind::Divorce => {}
    }
}

fn set_family_date(family: &mut Family, kind: DateKind, date: GedDate) {
    match kind {
        DateKind::Marriage => family.marriage = date,
        DateKind::Divorce => family.divorce = date,
        DateKind::Birth | DateKind::Death => {}
    }
}

/// Remove the `@` delimiters around a cross-reference identifier
fn strip_pointer(raw: &str) -> String {
    raw.replace('@', "")
}

/// Assemble a genealogy from a sequence of classified lines.
///
/// The first read error aborts the whole load.
pub fn assemble<I>(lines: I, today: NaiveDate) -> Result<Genealogy>
where
    I: IntoIterator<Item = Result<GedcomLine>>,
{
    let mut assembler = RecordAssembler::new();
    for line in lines {
        assembler.feed(&line?);
    }
    Ok(assembler.finish(today))
}

/// Assemble a genealogy from any buffered source
pub fn load_from_reader<R: BufRead>(source: R, path: &Path, today: NaiveDate) -> Result<Genealogy> {
    assemble(GedcomLines::new(source, path), today)
}

/// Assemble a genealogy from in-memory GEDCOM text
pub fn load_from_str(text: &str, today: NaiveDate) -> Result<Genealogy> {
    load_from_reader(Cursor::new(text), Path::new("<memory>"), today)
}

/// Open and assemble a GEDCOM file.
///
/// The file handle is dropped on every exit path, including read failures.
pub fn load_gedcom(path: &Path, today: NaiveDate) -> Result<Genealogy> {
    log_load_start(path);
    let start = Instant::now();

    let file = safe_open_file(path, "reading GEDCOM file")?;
    let genealogy = load_from_reader(BufReader::new(file), path, today)?;

    log_load_complete(
        path,
        genealogy.individuals.count(),
        genealogy.families.count(),
        start.elapsed(),
    );
    log_load_anomalies(
        path,
        genealogy.duplicate_ids().len(),
        genealogy.illegitimate_dates().len(),
    );
    Ok(genealogy)
}
