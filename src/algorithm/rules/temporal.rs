//! Temporal-ordering rules
//!
//! Each rule compares pairs of dates belonging to one individual, one family,
//! or a family and its members.

use chrono::NaiveDate;
use itertools::Itertools;

use super::limits::{
    GESTATION_MONTHS, MAX_AGE_YEARS, MAX_FATHER_AGE_GAP, MAX_MOTHER_AGE_GAP, MIN_MARRIAGE_AGE,
    SIBLING_SPACING_MONTHS, TWIN_WINDOW_DAYS,
};
use super::{children_with_birth, error, role_of, warning};
use crate::algorithm::engine::RuleContext;
use crate::diagnostics::{Diagnostic, RuleCode};
use crate::models::{EntityKind, Family, GedDate};
use crate::utils::date::{add_months, days_between, years_between};

/// US01: no recorded date may lie after `today`
#[must_use]
pub fn dates_before_today(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let today = context.today;
    let in_future = |date: &GedDate| date.valid().filter(|date| *date > today);
    let mut diagnostics = Vec::new();

    for individual in &context.genealogy.individuals {
        for (label, date) in [("Birthday", &individual.birth), ("Death", &individual.death)] {
            if let Some(date) = in_future(date) {
                diagnostics.push(error(
                    RuleCode::Us01,
                    EntityKind::Individual,
                    [individual.id.as_str()],
                    format!("{label} {date} occurs in the future"),
                ));
            }
        }
    }

    for family in &context.genealogy.families {
        for (label, date) in [("Marriage", &family.marriage), ("Divorce", &family.divorce)] {
            if let Some(date) = in_future(date) {
                diagnostics.push(error(
                    RuleCode::Us01,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!("{label} {date} occurs in the future"),
                ));
            }
        }
    }

    diagnostics
}

/// US02: spouses must be born before their marriage
#[must_use]
pub fn birth_before_marriage(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for family in &genealogy.families {
        let Some(marriage) = family.marriage.valid() else {
            continue;
        };
        for spouse in genealogy.husband(family).into_iter().chain(genealogy.wife(family)) {
            if let Some(birth) = spouse.birth.valid().filter(|birth| *birth > marriage) {
                diagnostics.push(error(
                    RuleCode::Us02,
                    EntityKind::Individual,
                    [spouse.id.as_str()],
                    format!(
                        "{} {} born {birth} after marriage on {marriage} in {}",
                        role_of(family, &spouse.id),
                        spouse.display_name(),
                        family.id
                    ),
                ));
            }
        }
    }

    diagnostics
}

/// US03: death may not precede birth
#[must_use]
pub fn birth_before_death(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .individuals
        .iter()
        .filter_map(|individual| {
            let birth = individual.birth.valid()?;
            let death = individual.death.valid().filter(|death| *death < birth)?;
            Some(error(
                RuleCode::Us03,
                EntityKind::Individual,
                [individual.id.as_str()],
                format!("Died {death} before born {birth}"),
            ))
        })
        .collect()
}

/// US04: divorce may not precede marriage; at most one diagnostic per family
#[must_use]
pub fn marriage_before_divorce(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .families
        .iter()
        .filter_map(|family| {
            let marriage = family.marriage.valid()?;
            let divorce = family.divorce.valid().filter(|divorce| *divorce < marriage)?;
            Some(error(
                RuleCode::Us04,
                EntityKind::Family,
                [family.id.as_str()],
                format!("Divorced {divorce} before married {marriage}"),
            ))
        })
        .collect()
}

/// Spouses of `family` whose valid death precedes `date`, as message fragments
fn spouses_dead_before(
    context: &RuleContext<'_>,
    family: &Family,
    date: NaiveDate,
) -> Vec<String> {
    let genealogy = context.genealogy;
    genealogy
        .husband(family)
        .into_iter()
        .chain(genealogy.wife(family))
        .filter_map(|spouse| {
            let death = spouse.death.valid().filter(|death| *death < date)?;
            Some(format!(
                "{} {} died {death}",
                role_of(family, &spouse.id).to_lowercase(),
                spouse.id
            ))
        })
        .collect()
}

/// US05: marriage must precede the death of both spouses
#[must_use]
pub fn marriage_before_death(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .families
        .iter()
        .filter_map(|family| {
            let marriage = family.marriage.valid()?;
            let dead = spouses_dead_before(context, family, marriage);
            (!dead.is_empty()).then(|| {
                error(
                    RuleCode::Us05,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!("Married {marriage} after {}", dead.join(" and ")),
                )
            })
        })
        .collect()
}

/// US06: divorce must precede the death of both spouses
#[must_use]
pub fn divorce_before_death(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .families
        .iter()
        .filter_map(|family| {
            let divorce = family.divorce.valid()?;
            let dead = spouses_dead_before(context, family, divorce);
            (!dead.is_empty()).then(|| {
                error(
                    RuleCode::Us06,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!("Divorced {divorce} after {}", dead.join(" and ")),
                )
            })
        })
        .collect()
}

/// US07: nobody lives to 150
#[must_use]
pub fn less_than_150_years_old(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .individuals
        .iter()
        .filter_map(|individual| {
            let age = individual
                .age_at(context.today)
                .filter(|age| *age >= MAX_AGE_YEARS)?;
            Some(error(
                RuleCode::Us07,
                EntityKind::Individual,
                [individual.id.as_str()],
                format!("Age {age} is {MAX_AGE_YEARS} years or more"),
            ))
        })
        .collect()
}

/// US08: children are born after the parents marry and within nine months of a divorce
#[must_use]
pub fn birth_before_parents_marriage(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for family in &context.genealogy.families {
        let marriage = family.marriage.valid();
        let divorce_limit = family
            .divorce
            .valid()
            .and_then(|divorce| add_months(divorce, GESTATION_MONTHS));

        for (child, birth) in children_with_birth(context, family) {
            if let Some(marriage) = marriage.filter(|marriage| birth < *marriage) {
                diagnostics.push(warning(
                    RuleCode::Us08,
                    EntityKind::Individual,
                    [child.id.as_str()],
                    format!(
                        "Born {birth} before parents in {} married on {marriage}",
                        family.id
                    ),
                ));
            }
            if divorce_limit.is_some_and(|limit| birth > limit) {
                diagnostics.push(warning(
                    RuleCode::Us08,
                    EntityKind::Individual,
                    [child.id.as_str()],
                    format!(
                        "Born {birth} more than {GESTATION_MONTHS} months after parents in {} divorced on {}",
                        family.id, family.divorce
                    ),
                ));
            }
        }
    }

    diagnostics
}

/// US09: children are born before the mother's death and within nine months of the father's
#[must_use]
pub fn birth_before_parents_death(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for family in &genealogy.families {
        let mother_death = genealogy.wife(family).and_then(|wife| wife.death.valid());
        let father_death = genealogy
            .husband(family)
            .and_then(|husband| husband.death.valid());
        let father_limit = father_death.and_then(|death| add_months(death, GESTATION_MONTHS));

        for (child, birth) in children_with_birth(context, family) {
            if let Some(death) = mother_death.filter(|death| birth > *death) {
                diagnostics.push(error(
                    RuleCode::Us09,
                    EntityKind::Individual,
                    [child.id.as_str()],
                    format!("Born {birth} after mother died on {death}"),
                ));
            }
            if let (Some(death), Some(limit)) = (father_death, father_limit) {
                if birth > limit {
                    diagnostics.push(error(
                        RuleCode::Us09,
                        EntityKind::Individual,
                        [child.id.as_str()],
                        format!(
                            "Born {birth} more than {GESTATION_MONTHS} months after father died on {death}"
                        ),
                    ));
                }
            }
        }
    }

    diagnostics
}

/// US10: both spouses are at least 14 when they marry
#[must_use]
pub fn marriage_after_14(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .families
        .iter()
        .filter_map(|family| {
            let marriage = family.marriage.valid()?;
            let too_young: Vec<String> = genealogy
                .husband(family)
                .into_iter()
                .chain(genealogy.wife(family))
                .filter_map(|spouse| {
                    let age = years_between(spouse.birth.valid()?, marriage);
                    (age < MIN_MARRIAGE_AGE).then(|| format!("{} aged {age}", spouse.id))
                })
                .collect();
            (!too_young.is_empty()).then(|| {
                warning(
                    RuleCode::Us10,
                    EntityKind::Family,
                    [family.id.as_str()],
                    format!(
                        "Married {marriage} with {} younger than {MIN_MARRIAGE_AGE}",
                        too_young.join(" and ")
                    ),
                )
            })
        })
        .collect()
}

/// US12: mothers are less than 60 and fathers less than 80 years older than their children
#[must_use]
pub fn parents_not_too_old(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for family in &genealogy.families {
        let parents = [
            (genealogy.wife(family), "Mother", MAX_MOTHER_AGE_GAP),
            (genealogy.husband(family), "Father", MAX_FATHER_AGE_GAP),
        ];
        for (child, child_birth) in children_with_birth(context, family) {
            for (parent, role, limit) in &parents {
                let Some(parent) = parent else { continue };
                let Some(parent_birth) = parent.birth.valid() else {
                    continue;
                };
                let gap = years_between(parent_birth, child_birth);
                if gap >= *limit {
                    diagnostics.push(warning(
                        RuleCode::Us12,
                        EntityKind::Individual,
                        [parent.id.as_str()],
                        format!("{role} is {gap} years older than child {}", child.id),
                    ));
                }
            }
        }
    }

    diagnostics
}

/// US13: siblings are born either within two days or at least eight months apart
#[must_use]
pub fn sibling_spacing(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for family in &context.genealogy.families {
        let children = children_with_birth(context, family);
        for ((a, a_birth), (b, b_birth)) in children.iter().tuple_combinations() {
            let (earlier, later) = if a_birth <= b_birth {
                (*a_birth, *b_birth)
            } else {
                (*b_birth, *a_birth)
            };
            let too_close = days_between(earlier, later) >= TWIN_WINDOW_DAYS
                && add_months(earlier, SIBLING_SPACING_MONTHS).is_some_and(|limit| later < limit);
            if too_close {
                diagnostics.push(warning(
                    RuleCode::Us13,
                    EntityKind::Individual,
                    [a.id.as_str(), b.id.as_str()],
                    format!(
                        "Siblings in {} born {earlier} and {later}, less than {SIBLING_SPACING_MONTHS} months apart",
                        family.id
                    ),
                ));
            }
        }
    }

    diagnostics
}
