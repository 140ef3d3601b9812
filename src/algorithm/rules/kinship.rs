//! Kinship rules
//!
//! Marriages between close relatives, checked per family on its two recorded
//! spouses.

use super::{error, warning};
use crate::algorithm::engine::RuleContext;
use crate::collections::Genealogy;
use crate::diagnostics::{Diagnostic, RuleCode, Severity};
use crate::models::{EntityKind, Family};

/// Whether `child` is recorded as a child of a family in which `parent` is a spouse
fn is_recorded_child_of(genealogy: &Genealogy, child: &str, parent: &str) -> bool {
    genealogy
        .families
        .with_spouse(parent)
        .iter()
        .any(|family| family.children.contains(child))
        || genealogy
            .parent_family(child)
            .is_some_and(|family| family.spouses().any(|spouse| spouse == parent))
}

fn spouse_ids(family: &Family) -> Option<(&str, &str)> {
    Some((family.husband.as_deref()?, family.wife.as_deref()?))
}

/// Apply a symmetric relation check to every couple and flag both spouses
fn married_relatives(
    context: &RuleContext<'_>,
    code: RuleCode,
    severity: Severity,
    relation: &str,
    related: impl Fn(&Genealogy, &str, &str) -> bool,
) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    genealogy
        .families
        .iter()
        .filter_map(|family| {
            let (husband, wife) = spouse_ids(family)?;
            related(genealogy, husband, wife).then(|| {
                let message = format!("{husband} and {wife} are {relation} married in {}", family.id);
                match severity {
                    Severity::Error => error(code, EntityKind::Individual, [husband, wife], message),
                    _ => warning(code, EntityKind::Individual, [husband, wife], message),
                }
            })
        })
        .collect()
}

/// US17: nobody marries their own recorded child
#[must_use]
pub fn no_marriages_to_children(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    let genealogy = context.genealogy;
    let mut diagnostics = Vec::new();

    for family in &genealogy.families {
        let Some((husband, wife)) = spouse_ids(family) else {
            continue;
        };
        for (parent, child) in [(husband, wife), (wife, husband)] {
            if is_recorded_child_of(genealogy, child, parent) {
                diagnostics.push(error(
                    RuleCode::Us17,
                    EntityKind::Individual,
                    [parent],
                    format!("Married to own child {child} in {}", family.id),
                ));
            }
        }
    }

    diagnostics
}

/// US18: full siblings do not marry
#[must_use]
pub fn siblings_should_not_marry(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    married_relatives(
        context,
        RuleCode::Us18,
        Severity::Error,
        "siblings",
        Genealogy::are_siblings,
    )
}

/// US19: first cousins do not marry
#[must_use]
pub fn first_cousins_should_not_marry(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    married_relatives(
        context,
        RuleCode::Us19,
        Severity::Warning,
        "first cousins",
        Genealogy::are_first_cousins,
    )
}

/// US20: aunts and uncles do not marry their nieces and nephews
#[must_use]
pub fn aunts_and_uncles(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    married_relatives(
        context,
        RuleCode::Us20,
        Severity::Warning,
        "aunt or uncle and niece or nephew",
        |genealogy, a, b| genealogy.is_aunt_or_uncle_of(a, b) || genealogy.is_aunt_or_uncle_of(b, a),
    )
}
