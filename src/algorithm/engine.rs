//! Rule engine
//!
//! Evaluates the rule catalogue against one genealogy and one fixed `today`.
//! Rules are independent and read-only, so they run in parallel; the report
//! is sorted afterwards and never depends on completion order.

use std::time::Instant;

use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::rules::{ingestion, kinship, listing, structural, temporal};
use crate::collections::Genealogy;
use crate::diagnostics::{Diagnostic, RuleCode, Severity, aggregate, sorted_ids};
use crate::utils::logging::log_rule_summary;

/// Everything a rule may read
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The graph under evaluation
    pub genealogy: &'a Genealogy,
    /// Reference date shared by every rule of one pass
    pub today: NaiveDate,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub const fn new(genealogy: &'a Genealogy, today: NaiveDate) -> Self {
        Self { genealogy, today }
    }
}

/// Result of one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub code: RuleCode,
    /// Flagged identifiers, deduplicated and in natural order
    pub flagged: Vec<String>,
    /// Diagnostics of this rule, sorted
    pub diagnostics: Vec<Diagnostic>,
}

impl RuleOutcome {
    /// Build an outcome whose flagged set is the union of the diagnostics' identifiers
    #[must_use]
    pub fn from_diagnostics(code: RuleCode, diagnostics: Vec<Diagnostic>) -> Self {
        let flagged = sorted_ids(diagnostics.iter().flat_map(|d| d.ids.iter().cloned()));
        Self {
            code,
            flagged,
            diagnostics: aggregate(diagnostics),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Outcomes of a full evaluation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    /// Evaluation date the pass used
    pub today: NaiveDate,
    outcomes: Vec<RuleOutcome>,
    diagnostics: Vec<Diagnostic>,
}

impl RuleReport {
    fn new(today: NaiveDate, mut outcomes: Vec<RuleOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.code);
        let diagnostics = aggregate(
            outcomes
                .iter()
                .flat_map(|outcome| outcome.diagnostics.iter().cloned()),
        );
        Self {
            today,
            outcomes,
            diagnostics,
        }
    }

    /// Per-rule outcomes in catalogue order
    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn outcome(&self, code: RuleCode) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|outcome| outcome.code == code)
    }

    /// Every diagnostic of the pass, sorted and deduplicated
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Flagged identifiers of one rule; empty when the rule was not evaluated
    #[must_use]
    pub fn flagged(&self, code: RuleCode) -> &[String] {
        self.outcome(code)
            .map_or(&[], |outcome| outcome.flagged.as_slice())
    }

    /// Diagnostics of one rule
    #[must_use]
    pub fn diagnostics_for(&self, code: RuleCode) -> &[Diagnostic] {
        self.outcome(code)
            .map_or(&[], |outcome| outcome.diagnostics.as_slice())
    }

    /// Number of diagnostics per severity
    #[must_use]
    pub fn count_by_severity(&self) -> FxHashMap<Severity, usize> {
        let mut counts = FxHashMap::default();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.severity).or_insert(0) += 1;
        }
        counts
    }

    /// Whether any `ERROR` diagnostic was produced
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluates a set of rules
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<RuleCode>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            rules: RuleCode::ALL.to_vec(),
        }
    }
}

impl RuleEngine {
    /// Engine over the whole catalogue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over a subset of the catalogue
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = RuleCode>) -> Self {
        let mut rules: Vec<RuleCode> = rules.into_iter().collect();
        rules.sort_unstable();
        rules.dedup();
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleCode] {
        &self.rules
    }

    /// Run every configured rule against `genealogy` as of `today`
    #[must_use]
    pub fn evaluate(&self, genealogy: &Genealogy, today: NaiveDate) -> RuleReport {
        let start = Instant::now();
        let context = RuleContext::new(genealogy, today);

        let outcomes: Vec<RuleOutcome> = self
            .rules
            .par_iter()
            .map(|&code| {
                let outcome = RuleOutcome::from_diagnostics(code, evaluate_rule(code, &context));
                if !outcome.is_clean() {
                    debug!(
                        "{code} ({}) flagged {} identifiers",
                        code.title(),
                        outcome.flagged.len()
                    );
                }
                outcome
            })
            .collect();

        let report = RuleReport::new(today, outcomes);
        log_rule_summary(self.rules.len(), report.diagnostics.len(), start.elapsed());
        report
    }
}

/// Dispatch one rule code to its implementation
#[must_use]
pub fn evaluate_rule(code: RuleCode, context: &RuleContext<'_>) -> Vec<Diagnostic> {
    match code {
        RuleCode::Us01 => temporal::dates_before_today(context),
        RuleCode::Us02 => temporal::birth_before_marriage(context),
        RuleCode::Us03 => temporal::birth_before_death(context),
        RuleCode::Us04 => temporal::marriage_before_divorce(context),
        RuleCode::Us05 => temporal::marriage_before_death(context),
        RuleCode::Us06 => temporal::divorce_before_death(context),
        RuleCode::Us07 => temporal::less_than_150_years_old(context),
        RuleCode::Us08 => temporal::birth_before_parents_marriage(context),
        RuleCode::Us09 => temporal::birth_before_parents_death(context),
        RuleCode::Us10 => temporal::marriage_after_14(context),
        RuleCode::Us11 => structural::no_bigamy(context),
        RuleCode::Us12 => temporal::parents_not_too_old(context),
        RuleCode::Us13 => temporal::sibling_spacing(context),
        RuleCode::Us14 => structural::multiple_births_at_most_5(context),
        RuleCode::Us15 => structural::fewer_than_15_siblings(context),
        RuleCode::Us16 => structural::male_last_names(context),
        RuleCode::Us17 => kinship::no_marriages_to_children(context),
        RuleCode::Us18 => kinship::siblings_should_not_marry(context),
        RuleCode::Us19 => kinship::first_cousins_should_not_marry(context),
        RuleCode::Us20 => kinship::aunts_and_uncles(context),
        RuleCode::Us21 => structural::correct_gender_for_role(context),
        RuleCode::Us22 => ingestion::unique_ids(context),
        RuleCode::Us23 => structural::unique_name_and_birth_date(context),
        RuleCode::Us24 => structural::unique_families_by_spouses(context),
        RuleCode::Us25 => structural::unique_first_names_in_families(context),
        RuleCode::Us26 => structural::corresponding_entries(context),
        RuleCode::Us28 => listing::order_siblings_by_age(context),
        RuleCode::Us29 => listing::list_deceased(context),
        RuleCode::Us30 => listing::list_living_married(context),
        RuleCode::Us31 => listing::list_living_single(context),
        RuleCode::Us32 => listing::list_multiple_births(context),
        RuleCode::Us33 => listing::list_orphans(context),
        RuleCode::Us34 => listing::list_large_age_differences(context),
        RuleCode::Us35 => listing::list_recent_births(context),
        RuleCode::Us36 => listing::list_recent_deaths(context),
        RuleCode::Us37 => {
            let recent = listing::recent_death_ids(context);
            listing::list_recent_survivors(context, &recent)
        }
        RuleCode::Us38 => listing::list_upcoming_birthdays(context),
        RuleCode::Us39 => listing::list_upcoming_anniversaries(context),
        RuleCode::Us42 => ingestion::reject_illegitimate_dates(context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Family, Individual};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Genealogy {
        let mut husband = Individual::new("I1");
        husband.birth = ymd(1950, 1, 1).into();
        husband.spouse_of.insert("F1".into());
        let mut wife = Individual::new("I2");
        wife.birth = ymd(1952, 1, 1).into();
        wife.death = ymd(1940, 1, 1).into();
        wife.spouse_of.insert("F1".into());
        let mut family = Family::new("F1");
        family.husband = Some("I1".into());
        family.wife = Some("I2".into());
        family.marriage = ymd(1975, 6, 1).into();
        family.divorce = ymd(1970, 6, 1).into();

        let mut genealogy = Genealogy::from_parts(vec![husband, wife], vec![family]);
        genealogy.finalize(ymd(2020, 1, 1));
        genealogy
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let genealogy = sample();
        let engine = RuleEngine::new();
        let first = engine.evaluate(&genealogy, ymd(2020, 1, 1));
        let second = engine.evaluate(&genealogy, ymd(2020, 1, 1));
        assert_eq!(first, second);
        assert_eq!(first.outcomes().len(), RuleCode::ALL.len());
    }

    #[test]
    fn test_report_lookup() {
        let genealogy = sample();
        let report = RuleEngine::new().evaluate(&genealogy, ymd(2020, 1, 1));
        assert_eq!(report.flagged(RuleCode::Us03), ["I2"]);
        assert_eq!(report.flagged(RuleCode::Us04), ["F1"]);
        assert_eq!(report.diagnostics_for(RuleCode::Us04).len(), 1);
        assert!(report.has_errors());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"US04\""));
        assert!(json.contains("\"ERROR\""));
        assert!(!json.contains("\"Us04\""));
    }

    #[test]
    fn test_severity_counts_and_clean_outcomes() {
        let genealogy = sample();
        let engine = RuleEngine::with_rules([RuleCode::Us01, RuleCode::Us03, RuleCode::Us04]);
        let report = engine.evaluate(&genealogy, ymd(2020, 1, 1));

        let counts = report.count_by_severity();
        assert_eq!(counts.get(&Severity::Error), Some(&2));
        assert_eq!(counts.get(&Severity::Warning), None);
        assert!(report.outcome(RuleCode::Us01).unwrap().is_clean());
        assert!(!report.outcome(RuleCode::Us03).unwrap().is_clean());
    }

    #[test]
    fn test_subset_engine() {
        let genealogy = sample();
        let engine = RuleEngine::with_rules([RuleCode::Us04, RuleCode::Us03, RuleCode::Us04]);
        assert_eq!(engine.rules(), [RuleCode::Us03, RuleCode::Us04]);
        let report = engine.evaluate(&genealogy, ymd(2020, 1, 1));
        assert!(report.flagged(RuleCode::Us01).is_empty());
        assert!(
            report
                .diagnostics()
                .iter()
                .all(|d| matches!(d.code, RuleCode::Us03 | RuleCode::Us04))
        );
    }
}
