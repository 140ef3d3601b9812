//! The rule catalogue
//!
//! Every rule is a pure function of a [`RuleContext`] returning the
//! diagnostics it raises. The identifiers carried by those diagnostics are the
//! rule's flagged identifiers.
//!
//! Operands that are INVALID or absent never take part in a comparison, and
//! unresolved references are skipped by every rule except the two that report
//! them (`US21`, `US26`).

pub mod ingestion;
pub mod kinship;
pub mod limits;
pub mod listing;
pub mod structural;
pub mod temporal;

use chrono::NaiveDate;

use crate::algorithm::engine::RuleContext;
use crate::diagnostics::{Diagnostic, RuleCode, Severity};
use crate::models::{EntityKind, Family, Individual};

pub(crate) fn error<I, S>(code: RuleCode, entity: EntityKind, ids: I, message: String) -> Diagnostic
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Diagnostic::new(Severity::Error, code, entity, ids, message)
}

pub(crate) fn warning<I, S>(
    code: RuleCode,
    entity: EntityKind,
    ids: I,
    message: String,
) -> Diagnostic
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Diagnostic::new(Severity::Warning, code, entity, ids, message)
}

pub(crate) fn info<I, S>(code: RuleCode, entity: EntityKind, ids: I, message: String) -> Diagnostic
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Diagnostic::new(Severity::Info, code, entity, ids, message)
}

/// Resolved children of `family` that have a valid birth date
pub(crate) fn children_with_birth<'a>(
    context: &RuleContext<'a>,
    family: &'a Family,
) -> Vec<(&'a Individual, NaiveDate)> {
    context
        .genealogy
        .children(family)
        .filter_map(|child| child.birth.valid().map(|birth| (child, birth)))
        .collect()
}

/// Role word used in messages
pub(crate) fn role_of(family: &Family, id: &str) -> &'static str {
    if family.husband.as_deref() == Some(id) {
        "Husband"
    } else {
        "Wife"
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small builders shared by the rule tests

    use chrono::NaiveDate;

    use crate::collections::Genealogy;
    use crate::models::{Family, Individual, Sex};

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn today() -> NaiveDate {
        ymd(2020, 3, 1)
    }

    pub fn person(id: &str, name: &str, sex: Sex, birth: Option<NaiveDate>) -> Individual {
        let mut individual = Individual::new(id);
        individual.name = Some(name.to_string());
        individual.sex = sex;
        if let Some(birth) = birth {
            individual.birth = birth.into();
        }
        individual
    }

    pub fn couple(id: &str, husband: &str, wife: &str, marriage: Option<NaiveDate>) -> Family {
        let mut family = Family::new(id);
        family.husband = Some(husband.to_string());
        family.wife = Some(wife.to_string());
        if let Some(marriage) = marriage {
            family.marriage = marriage.into();
        }
        family
    }

    /// Build a consistent genealogy: spouse and child links are mirrored onto
    /// the individuals from the families before finalizing.
    pub fn linked(mut individuals: Vec<Individual>, families: Vec<Family>) -> Genealogy {
        for family in &families {
            for individual in &mut individuals {
                if family.husband.as_deref() == Some(individual.id.as_str())
                    || family.wife.as_deref() == Some(individual.id.as_str())
                {
                    individual.spouse_of.insert(family.id.clone());
                }
                if family.children.contains(&individual.id) {
                    individual.child_of = Some(family.id.clone());
                }
            }
        }
        let mut genealogy = Genealogy::from_parts(individuals, families);
        genealogy.finalize(today());
        genealogy
    }
}
