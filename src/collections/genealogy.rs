//! The genealogy graph
//!
//! `Genealogy` owns every individual and family built from a file. Links
//! between them are identifiers and are always resolved by a fresh lookup,
//! so an unresolved reference is simply a `None`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::collections::{FamilyCollection, IndividualCollection};
use crate::models::{DateKind, EntityKind, Family, Individual};

/// An identifier declared by more than one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateId {
    /// Record kind the identifier was declared for
    pub kind: EntityKind,
    /// The identifier
    pub id: String,
    /// 1-based line of the rejected declaration
    pub line_number: usize,
}

/// A date payload that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IllegitimateDate {
    /// Record kind of the owning entity
    pub kind: EntityKind,
    /// Owning individual or family
    pub owner: String,
    /// Which field would have received the date
    pub date_kind: DateKind,
    /// The payload exactly as it appeared
    pub raw: String,
    /// 1-based line of the `DATE` line
    pub line_number: usize,
}

/// Individuals and families of one file, plus the anomalies found while loading it
#[derive(Debug, Clone, Default)]
pub struct Genealogy {
    pub individuals: IndividualCollection,
    pub families: FamilyCollection,
    duplicate_ids: Vec<DuplicateId>,
    illegitimate_dates: Vec<IllegitimateDate>,
}

impl Genealogy {
    /// Create a new empty genealogy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a genealogy from already-built entities
    #[must_use]
    pub fn from_parts(individuals: Vec<Individual>, families: Vec<Family>) -> Self {
        Self {
            individuals: IndividualCollection::from_individuals(individuals),
            families: FamilyCollection::from_families(families),
            ..Self::default()
        }
    }

    pub(crate) fn record_duplicate(&mut self, duplicate: DuplicateId) {
        self.duplicate_ids.push(duplicate);
    }

    pub(crate) fn record_illegitimate_date(&mut self, date: IllegitimateDate) {
        self.illegitimate_dates.push(date);
    }

    /// Identifiers that were declared more than once, in encounter order
    #[must_use]
    pub fn duplicate_ids(&self) -> &[DuplicateId] {
        &self.duplicate_ids
    }

    /// Unparsable dates, in encounter order
    #[must_use]
    pub fn illegitimate_dates(&self) -> &[IllegitimateDate] {
        &self.illegitimate_dates
    }

    /// Compute the derived fields.
    ///
    /// Run once after the last line has been assembled.
    pub fn finalize(&mut self, today: NaiveDate) {
        self.individuals.compute_derived(today);
    }

    #[must_use]
    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    #[must_use]
    pub fn family(&self, id: &str) -> Option<&Family> {
        self.families.get(id)
    }

    /// Display name of an individual, `NA` when unresolved
    #[must_use]
    pub fn name_of(&self, id: Option<&str>) -> &str {
        id.and_then(|id| self.individual(id))
            .map_or("NA", Individual::display_name)
    }

    /// Resolved husband of a family
    #[must_use]
    pub fn husband(&self, family: &Family) -> Option<&Individual> {
        family.husband.as_deref().and_then(|id| self.individual(id))
    }

    /// Resolved wife of a family
    #[must_use]
    pub fn wife(&self, family: &Family) -> Option<&Individual> {
        family.wife.as_deref().and_then(|id| self.individual(id))
    }

    /// Resolved children of a family, from the family's `CHIL` references
    pub fn children<'a>(&'a self, family: &'a Family) -> impl Iterator<Item = &'a Individual> {
        family
            .children
            .iter()
            .filter_map(|id| self.individual(id))
    }

    /// Recorded parents (husband and wife of the `FAMC` family), resolved
    #[must_use]
    pub fn parents_of(&self, id: &str) -> Vec<&Individual> {
        self.parent_family(id)
            .map(|family| {
                self.husband(family)
                    .into_iter()
                    .chain(self.wife(family))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The family in which `id` is a child, resolved
    #[must_use]
    pub fn parent_family(&self, id: &str) -> Option<&Family> {
        self.individual(id)
            .and_then(|individual| individual.child_of.as_deref())
            .and_then(|family| self.family(family))
    }

    /// Full siblings: distinct individuals with the same recorded parent family
    #[must_use]
    pub fn are_siblings(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let parent_family = |id: &str| self.individual(id).and_then(|i| i.child_of.clone());
        matches!((parent_family(a), parent_family(b)), (Some(x), Some(y)) if x == y)
    }

    /// First cousins: some parent of `a` is a sibling of some parent of `b`
    #[must_use]
    pub fn are_first_cousins(&self, a: &str, b: &str) -> bool {
        let parents_b = self.parents_of(b);
        self.parents_of(a).iter().any(|pa| {
            parents_b
                .iter()
                .any(|pb| self.are_siblings(&pa.id, &pb.id))
        })
    }

    /// Whether `elder` is a sibling of one of `younger`'s parents
    #[must_use]
    pub fn is_aunt_or_uncle_of(&self, elder: &str, younger: &str) -> bool {
        self.parents_of(younger)
            .iter()
            .any(|parent| self.are_siblings(elder, &parent.id))
    }
}
