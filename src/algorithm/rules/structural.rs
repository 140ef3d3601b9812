//! Structural and referential rules
//!
//! Uniqueness, role and link consistency checks over individuals and families.

use chrono::NaiveDate;
use itertools::Itertools;

use super::limits::{MAX_MULTIPLE_BIRTHS, MAX_SIBLINGS};
use super::{children_with_birth, error, warning};
use crate::algorithm::engine::RuleContext;
use crate::diagnostics::{Diagnostic, RuleCode, sorted_ids};
use crate::models::{EntityKind, Family, GedDate, Sex};

/// When a marriage stops counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarriageEnd {
    /// Neither divorce nor the other spouse's death was recorded
    Open,
    Ended(NaiveDate),
    /// One of the ending dates is unparsable
    Unknown,
}

fn marriage_end(context: &RuleContext<'_>, family: &Family, spouse: &str) -> MarriageEnd {
    let partner_death = family
        .other_spouse(spouse)
        .and_then(|partner| context.genealogy.individual(partner))
        .map_or(GedDate::Missing, |partner| partner.death.clone());

    match (&family.divorce, &partner_death) {
        (GedDate::Invalid(_), _) | (_, GedDate::Invalid(_)) => MarriageEnd::Unknown,
        (GedDate::Missing, GedDate::Missing) => MarriageEnd::Open,
        (divorce, death) => divorce
            .valid()
            .into_iter()
            .chain(death.valid())
            .min()
            .map_or(MarriageEnd::Open, MarriageEnd::Ended),
    }
}

/// US11: nobody is a spouse in two marriages at the same time
///
/// A marriage runs from its marriage date until the divorce or the other
/// spouse's death, whichever comes first.
#[must_use]
pub fn no_bigamy(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for individual in &genealogy.individuals {
        let marriages: Vec<(&Family, NaiveDate, MarriageEnd)> = genealogy
            .families
            .with_spouse(&individual.id)
            .into_iter()
            .filter_map(|family| {
                let start = family.marriage.valid()?;
                Some((family, start, marriage_end(context, family, &individual.id)))
            })
            .sorted_by_key(|(_, start, _)| *start)
            .collect();

        for ((first, _, first_end), (second, second_start, _)) in
            marriages.iter().tuple_combinations()
        {
            let overlaps = match first_end {
                MarriageEnd::Open => true,
                MarriageEnd::Ended(end) => end > second_start,
                MarriageEnd::Unknown => false,
            };
            if overlaps {
                diagnostics.push(error(
                    RuleCode::Us11,
                    EntityKind::Individual,
                    [individual.id.as_str()],
                    format!(
                        "Married in {} on {} while still married in {}",
                        second.id, second_start, first.id
                    ),
                ));
            }
        }
    }

    diagnostics
}

/// US14: no more than five children of a family share a birth date
#[must_use]
pub fn multiple_births_at_most_5(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for family in &context.genealogy.families {
        let births = children_with_birth(context, family)
            .into_iter()
            .map(|(_, birth)| birth)
            .counts();
        for (birth, count) in births.into_iter().sorted() {
            if count > MAX_MULTIPLE_BIRTHS {
                diagnostics.push(warning(
                    RuleCode::Us14,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!("{count} children born on {birth}"),
                ));
            }
        }
    }

    diagnostics
}

/// US15: a family has fewer than 15 children
#[must_use]
pub fn fewer_than_15_siblings(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .families
        .with_min_children(MAX_SIBLINGS)
        .into_iter()
        .map(|family| {
            warning(
                RuleCode::Us15,
                EntityKind::Family,
                [family.id.as_str()],
                format!(
                    "{} children, limit is fewer than {MAX_SIBLINGS}",
                    family.family_size()
                ),
            )
        })
        .collect()
}

/// US16: sons carry their father's surname
#[must_use]
pub fn male_last_names(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for family in &genealogy.families {
        let Some(surname) = genealogy.husband(family).and_then(|father| father.surname()) else {
            continue;
        };
        for son in genealogy
            .children(family)
            .filter(|child| child.sex == Sex::Male)
        {
            if let Some(son_surname) = son.surname().filter(|s| *s != surname) {
                diagnostics.push(warning(
                    RuleCode::Us16,
                    EntityKind::Individual,
                    [son.id.as_str()],
                    format!(
                        "Surname {son_surname} differs from father's surname {surname} in {}",
                        family.id
                    ),
                ));
            }
        }
    }

    diagnostics
}

/// US21: husbands are male and wives are female
#[must_use]
pub fn correct_gender_for_role(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for family in &genealogy.families {
        let roles = [
            ("Husband", family.husband.as_deref(), Sex::Male),
            ("Wife", family.wife.as_deref(), Sex::Female),
        ];
        for (role, reference, expected) in roles {
            let Some(id) = reference else { continue };
            match genealogy.individual(id) {
                Some(spouse) if spouse.sex != expected => diagnostics.push(error(
                    RuleCode::Us21,
                    EntityKind::Individual,
                    [id],
                    format!(
                        "{role} in {} has sex {}, expected {expected}",
                        family.id, spouse.sex
                    ),
                )),
                Some(_) => {}
                None => diagnostics.push(error(
                    RuleCode::Us21,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!("{role} {id} is not a recorded individual"),
                )),
            }
        }
    }

    diagnostics
}

/// US23: no two individuals share both name and birth date
#[must_use]
pub fn unique_name_and_birth_date(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .individuals
        .iter()
        .filter_map(|individual| {
            let name = individual.name.as_deref()?;
            let birth = individual.birth.valid()?;
            Some(((name, birth), individual.id.as_str()))
        })
        .into_group_map()
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((name, birth), ids)| {
            warning(
                RuleCode::Us23,
                EntityKind::Individual,
                sorted_ids(ids),
                format!("Share name {name} and birth date {birth}"),
            )
        })
        .collect()
}

/// US24: no two families share husband name, wife name and marriage date
#[must_use]
pub fn unique_families_by_spouses(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .families
        .iter()
        .filter_map(|family| {
            let husband = genealogy.husband(family)?.name.as_deref()?;
            let wife = genealogy.wife(family)?.name.as_deref()?;
            let marriage = family.marriage.valid()?;
            Some(((husband, wife, marriage), family.id.as_str()))
        })
        .into_group_map()
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((husband, wife, marriage), ids)| {
            warning(
                RuleCode::Us24,
                EntityKind::Family,
                sorted_ids(ids),
                format!("Share spouses {husband} and {wife} married on {marriage}"),
            )
        })
        .collect()
}

/// US25: no two children of a family share first name and birth date
#[must_use]
pub fn unique_first_names_in_families(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for family in &context.genealogy.families {
        let groups = children_with_birth(context, family)
            .into_iter()
            .filter_map(|(child, birth)| Some(((child.given_name()?, birth), child.id.as_str())))
            .into_group_map();
        for ((given, birth), ids) in groups {
            if ids.len() > 1 {
                diagnostics.push(warning(
                    RuleCode::Us25,
                    EntityKind::Individual,
                    sorted_ids(ids),
                    format!("Children of {} share first name {given} and birth date {birth}", family.id),
                ));
            }
        }
    }

    diagnostics
}

/// US26: links between individuals and families are mirrored on both sides
#[must_use]
pub fn corresponding_entries(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();
    let mut report = |id: &str, message: String| {
        diagnostics.push(error(RuleCode::Us26, EntityKind::Individual, [id], message));
    };

    for individual in &genealogy.individuals {
        let id = individual.id.as_str();
        if let Some(family_id) = individual.child_of.as_deref() {
            match genealogy.family(family_id) {
                None => report(id, format!("Child of {family_id}, which is not a recorded family")),
                Some(family) if !family.children.contains(id) => {
                    report(id, format!("Child of {family_id}, which does not list it as a child"));
                }
                Some(_) => {}
            }
        }
        for family_id in &individual.spouse_of {
            match genealogy.family(family_id) {
                None => report(id, format!("Spouse in {family_id}, which is not a recorded family")),
                Some(family) if !family.spouses().any(|spouse| spouse == id) => {
                    report(id, format!("Spouse in {family_id}, which does not list it as a spouse"));
                }
                Some(_) => {}
            }
        }
    }

    for family in &genealogy.families {
        for spouse_id in family.spouses() {
            match genealogy.individual(spouse_id) {
                None => report(
                    spouse_id,
                    format!("Spouse in {}, but not a recorded individual", family.id),
                ),
                Some(spouse) if !spouse.spouse_of.contains(&family.id) => report(
                    spouse_id,
                    format!("Listed as spouse in {}, but does not name it", family.id),
                ),
                Some(_) => {}
            }
        }
        for child_id in &family.children {
            match genealogy.individual(child_id) {
                None => report(
                    child_id,
                    format!("Child in {}, but not a recorded individual", family.id),
                ),
                Some(child) if child.child_of.as_deref() != Some(family.id.as_str()) => report(
                    child_id,
                    format!("Listed as child in {}, but does not name it", family.id),
                ),
                Some(_) => {}
            }
        }
    }

    diagnostics
}
