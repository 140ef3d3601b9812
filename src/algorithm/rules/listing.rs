//! Listing rules
//!
//! These do not find defects. They list individuals and families that match
//! a condition, often relative to `today`, and report them at `INFO`.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

use super::limits::{ORPHAN_AGE_LIMIT, RECENT_DAYS, SINGLE_AGE_THRESHOLD, UPCOMING_DAYS};
use super::{children_with_birth, info};
use crate::algorithm::engine::RuleContext;
use crate::diagnostics::{Diagnostic, RuleCode, natural_cmp, sorted_ids};
use crate::models::{EntityKind, Individual};
use crate::utils::date::{next_anniversary, within_last_days, within_next_days, years_between};

/// Living relatives of one recently deceased individual
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Survivors {
    /// The deceased individual
    pub deceased: String,
    /// Living spouses, naturally ordered
    pub spouses: Vec<String>,
    /// Living children, naturally ordered
    pub children: Vec<String>,
}

impl Survivors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spouses.is_empty() && self.children.is_empty()
    }
}

fn listed(code: RuleCode, individual: &Individual, message: String) -> Diagnostic {
    info(code, EntityKind::Individual, [individual.id.as_str()], message)
}

/// Oldest first; undated children go last, ties break on identifier
fn by_age(a: &Individual, b: &Individual) -> Ordering {
    match (a.birth.valid(), b.birth.valid()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| natural_cmp(&a.id, &b.id))
}

/// Children of `family_id`, oldest first
#[must_use]
pub fn siblings_by_age<'a>(context: &RuleContext<'a>, family_id: &str) -> Vec<&'a Individual> {
    context
        .genealogy
        .family(family_id)
        .map(|family| {
            context
                .genealogy
                .children(family)
                .sorted_by(|a, b| by_age(a, b))
                .collect()
        })
        .unwrap_or_default()
}

/// US28: children of each family, oldest first
#[must_use]
pub fn order_siblings_by_age(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .families
        .iter()
        .filter_map(|family| {
            let ordered = siblings_by_age(context, &family.id);
            (!ordered.is_empty()).then(|| {
                let listing = ordered
                    .iter()
                    .map(|child| match child.age {
                        Some(age) => format!("{} ({age})", child.id),
                        None => format!("{} (NA)", child.id),
                    })
                    .join(", ");
                info(
                    RuleCode::Us28,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!("Children oldest first: {listing}"),
                )
            })
        })
        .collect()
}

/// US29: everyone with a recorded death
#[must_use]
pub fn list_deceased(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .individuals
        .deceased()
        .into_iter()
        .map(|individual| {
            listed(
                RuleCode::Us29,
                individual,
                format!("{} died {}", individual.display_name(), individual.death),
            )
        })
        .collect()
}

/// US30: living individuals in an undissolved marriage
#[must_use]
pub fn list_living_married(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .individuals
        .alive()
        .into_iter()
        .filter_map(|individual| {
            let family = genealogy
                .families
                .with_spouse(&individual.id)
                .into_iter()
                .find(|family| !family.is_divorced())?;
            Some(listed(
                RuleCode::Us30,
                individual,
                format!("{} is married in {}", individual.display_name(), family.id),
            ))
        })
        .collect()
}

/// US31: living individuals over 30 who were never a spouse
#[must_use]
pub fn list_living_single(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .individuals
        .alive()
        .into_iter()
        .filter(|individual| {
            individual.spouse_of.is_empty() && genealogy.families.with_spouse(&individual.id).is_empty()
        })
        .filter_map(|individual| {
            let age = individual
                .age_at(context.today)
                .filter(|age| *age > SINGLE_AGE_THRESHOLD)?;
            Some(listed(
                RuleCode::Us31,
                individual,
                format!("{} is {age} and has never married", individual.display_name()),
            ))
        })
        .collect()
}

/// US32: children of one family born on the same day
#[must_use]
pub fn list_multiple_births(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for family in &context.genealogy.families {
        let groups = children_with_birth(context, family)
            .into_iter()
            .map(|(child, birth)| (birth, child.id.as_str()))
            .into_group_map();
        for (birth, ids) in groups.into_iter().sorted() {
            if ids.len() > 1 {
                diagnostics.push(info(
                    RuleCode::Us32,
                    EntityKind::Individual,
                    sorted_ids(ids),
                    format!("Born together on {birth} in {}", family.id),
                ));
            }
        }
    }

    diagnostics
}

/// US33: children under 18 whose recorded parents have both died
#[must_use]
pub fn list_orphans(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .individuals
        .iter()
        .filter_map(|child| {
            let family = genealogy.parent_family(&child.id)?;
            let father = genealogy.husband(family)?;
            let mother = genealogy.wife(family)?;
            if !(father.is_deceased() && mother.is_deceased()) {
                return None;
            }
            let age = child
                .age_at(context.today)
                .filter(|age| (1..ORPHAN_AGE_LIMIT).contains(age))?;
            Some(listed(
                RuleCode::Us33,
                child,
                format!("{} is an orphan aged {age}", child.display_name()),
            ))
        })
        .collect()
}

/// US34: couples where one spouse was more than twice the other's age at marriage
#[must_use]
pub fn list_large_age_differences(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .families
        .iter()
        .filter_map(|family| {
            let marriage = family.marriage.valid()?;
            let husband = genealogy.husband(family)?;
            let wife = genealogy.wife(family)?;
            let husband_age = years_between(husband.birth.valid()?, marriage);
            let wife_age = years_between(wife.birth.valid()?, marriage);
            let (older, younger) = if husband_age >= wife_age {
                (husband_age, wife_age)
            } else {
                (wife_age, husband_age)
            };
            (older > 2 * younger).then(|| {
                info(
                    RuleCode::Us34,
                    EntityKind::Individual,
                    [husband.id.as_str(), wife.id.as_str()],
                    format!(
                        "Married in {} aged {husband_age} and {wife_age}",
                        family.id
                    ),
                )
            })
        })
        .collect()
}

/// US35: births within the last 30 days
#[must_use]
pub fn list_recent_births(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .individuals
        .iter()
        .filter_map(|individual| {
            let birth = individual
                .birth
                .valid()
                .filter(|birth| within_last_days(*birth, context.today, RECENT_DAYS))?;
            Some(listed(
                RuleCode::Us35,
                individual,
                format!("{} born {birth}", individual.display_name()),
            ))
        })
        .collect()
}

/// Identifiers of everyone who died within the last 30 days, naturally ordered
#[must_use]
pub fn recent_death_ids(context: &RuleContext<'_>) -> Vec<String> {
    sorted_ids(
        context
            .genealogy
            .individuals
            .iter()
            .filter(|individual| {
                individual
                    .death
                    .valid()
                    .is_some_and(|death| within_last_days(death, context.today, RECENT_DAYS))
            })
            .map(|individual| individual.id.as_str()),
    )
}

/// US36: deaths within the last 30 days
#[must_use]
pub fn list_recent_deaths(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    recent_death_ids(context)
        .iter()
        .filter_map(|id| context.genealogy.individual(id))
        .map(|individual| {
            listed(
                RuleCode::Us36,
                individual,
                format!("{} died {}", individual.display_name(), individual.death),
            )
        })
        .collect()
}

/// Living spouses and children of each individual in `recent_deaths`
#[must_use]
pub fn recent_survivors(context: &RuleContext<'_>, recent_deaths: &[String]) -> Vec<Survivors> {
    let genealogy = context.genealogy;
    let living = |id: &str| genealogy.individual(id).is_some_and(|individual| individual.alive);

    recent_deaths
        .iter()
        .map(|deceased| {
            let families = genealogy.families.with_spouse(deceased);
            let spouses = families
                .iter()
                .filter_map(|family| family.other_spouse(deceased))
                .filter(|id| living(id));
            let children = families
                .iter()
                .flat_map(|family| family.children.iter().map(String::as_str))
                .filter(|id| living(id));
            Survivors {
                deceased: deceased.clone(),
                spouses: sorted_ids(spouses),
                children: sorted_ids(children),
            }
        })
        .collect()
}

/// US37: living spouses and children of everyone in `recent_deaths`
#[must_use]
pub fn list_recent_survivors(context: &RuleContext<'_>, recent_deaths: &[String]) -> Vec<Diagnostic> {
    recent_survivors(context, recent_deaths)
        .into_iter()
        .filter(|survivors| !survivors.is_empty())
        .map(|survivors| {
            let message = format!(
                "Survivors of {}: spouses [{}], children [{}]",
                survivors.deceased,
                survivors.spouses.join(", "),
                survivors.children.join(", ")
            );
            info(
                RuleCode::Us37,
                EntityKind::Individual,
                survivors.spouses.into_iter().chain(survivors.children),
                message,
            )
        })
        .collect()
}

/// US38: living individuals with a birthday in the next 30 days
#[must_use]
pub fn list_upcoming_birthdays(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .individuals
        .alive()
        .into_iter()
        .filter_map(|individual| {
            let birth = individual.birth.valid()?;
            if !within_next_days(birth, context.today, UPCOMING_DAYS) {
                return None;
            }
            let next = next_anniversary(birth, context.today)?;
            Some(listed(
                RuleCode::Us38,
                individual,
                format!("{} has a birthday on {next}", individual.display_name()),
            ))
        })
        .collect()
}

/// US39: undivorced couples, both living, with an anniversary in the next 30 days
#[must_use]
pub fn list_upcoming_anniversaries(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .families
        .iter()
        .filter(|family| !family.is_divorced())
        .filter_map(|family| {
            let marriage = family.marriage.valid()?;
            let both_living = genealogy.husband(family)?.alive && genealogy.wife(family)?.alive;
            if !both_living || !within_next_days(marriage, context.today, UPCOMING_DAYS) {
                return None;
            }
            let next = next_anniversary(marriage, context.today)?;
            Some(info(
                RuleCode::Us39,
                EntityKind::Family,
                [family.id.as_str()],
                format!("Anniversary on {next}"),
            ))
        })
        .collect()
}
