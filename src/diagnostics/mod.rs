//! Diagnostics produced by ingestion and by the rule catalogue
//!
//! A [`Diagnostic`] carries a severity, the rule code that produced it, the
//! kind of entity it is about, the flagged identifiers and a message. The
//! aggregation helpers here give every report a deterministic order.

pub mod sink;

pub use sink::{DiagnosticSink, WriterSink};

use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::models::EntityKind;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Data that cannot be right
    Error,
    /// Data that is suspicious but possible
    Warning,
    /// Listing output, not a defect
    Info,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule codes of the catalogue, one per user story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleCode {
    Us01,
    Us02,
    Us03,
    Us04,
    Us05,
    Us06,
    Us07,
    Us08,
    Us09,
    Us10,
    Us11,
    Us12,
    Us13,
    Us14,
    Us15,
    Us16,
    Us17,
    Us18,
    Us19,
    Us20,
    Us21,
    Us22,
    Us23,
    Us24,
    Us25,
    Us26,
    Us28,
    Us29,
    Us30,
    Us31,
    Us32,
    Us33,
    Us34,
    Us35,
    Us36,
    Us37,
    Us38,
    Us39,
    Us42,
}

impl RuleCode {
    /// Every rule in the catalogue, in code order
    pub const ALL: [Self; 39] = [
        Self::Us01,
        Self::Us02,
        Self::Us03,
        Self::Us04,
        Self::Us05,
        Self::Us06,
        Self::Us07,
        Self::Us08,
        Self::Us09,
        Self::Us10,
        Self::Us11,
        Self::Us12,
        Self::Us13,
        Self::Us14,
        Self::Us15,
        Self::Us16,
        Self::Us17,
        Self::Us18,
        Self::Us19,
        Self::Us20,
        Self::Us21,
        Self::Us22,
        Self::Us23,
        Self::Us24,
        Self::Us25,
        Self::Us26,
        Self::Us28,
        Self::Us29,
        Self::Us30,
        Self::Us31,
        Self::Us32,
        Self::Us33,
        Self::Us34,
        Self::Us35,
        Self::Us36,
        Self::Us37,
        Self::Us38,
        Self::Us39,
        Self::Us42,
    ];

    /// Numeric part of the code
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Us01 => 1,
            Self::Us02 => 2,
            Self::Us03 => 3,
            Self::Us04 => 4,
            Self::Us05 => 5,
            Self::Us06 => 6,
            Self::Us07 => 7,
            Self::Us08 => 8,
            Self::Us09 => 9,
            Self::Us10 => 10,
            Self::Us11 => 11,
            Self::Us12 => 12,
            Self::Us13 => 13,
            Self::Us14 => 14,
            Self::Us15 => 15,
            Self::Us16 => 16,
            Self::Us17 => 17,
            Self::Us18 => 18,
            Self::Us19 => 19,
            Self::Us20 => 20,
            Self::Us21 => 21,
            Self::Us22 => 22,
            Self::Us23 => 23,
            Self::Us24 => 24,
            Self::Us25 => 25,
            Self::Us26 => 26,
            Self::Us28 => 28,
            Self::Us29 => 29,
            Self::Us30 => 30,
            Self::Us31 => 31,
            Self::Us32 => 32,
            Self::Us33 => 33,
            Self::Us34 => 34,
            Self::Us35 => 35,
            Self::Us36 => 36,
            Self::Us37 => 37,
            Self::Us38 => 38,
            Self::Us39 => 39,
            Self::Us42 => 42,
        }
    }

    /// Short title of the user story
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Us01 => "Dates before current date",
            Self::Us02 => "Birth before marriage",
            Self::Us03 => "Birth before death",
            Self::Us04 => "Marriage before divorce",
            Self::Us05 => "Marriage before death",
            Self::Us06 => "Divorce before death",
            Self::Us07 => "Less than 150 years old",
            Self::Us08 => "Birth before marriage of parents",
            Self::Us09 => "Birth before death of parents",
            Self::Us10 => "Marriage after 14",
            Self::Us11 => "No bigamy",
            Self::Us12 => "Parents not too old",
            Self::Us13 => "Siblings spacing",
            Self::Us14 => "Multiple births <= 5",
            Self::Us15 => "Fewer than 15 siblings",
            Self::Us16 => "Male last names",
            Self::Us17 => "No marriages to children",
            Self::Us18 => "Siblings should not marry",
            Self::Us19 => "First cousins should not marry",
            Self::Us20 => "Aunts and uncles",
            Self::Us21 => "Correct gender for role",
            Self::Us22 => "Unique IDs",
            Self::Us23 => "Unique name and birth date",
            Self::Us24 => "Unique families by spouses",
            Self::Us25 => "Unique first names in families",
            Self::Us26 => "Corresponding entries",
            Self::Us28 => "Order siblings by age",
            Self::Us29 => "List deceased",
            Self::Us30 => "List living married",
            Self::Us31 => "List living single",
            Self::Us32 => "List multiple births",
            Self::Us33 => "List orphans",
            Self::Us34 => "List large age differences",
            Self::Us35 => "List recent births",
            Self::Us36 => "List recent deaths",
            Self::Us37 => "List recent survivors",
            Self::Us38 => "List upcoming birthdays",
            Self::Us39 => "List upcoming anniversaries",
            Self::Us42 => "Reject illegitimate dates",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "US{:02}", self.number())
    }
}

/// One finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: RuleCode,
    /// Kind of entity the flagged identifiers refer to
    pub entity: EntityKind,
    /// Flagged identifiers, in the order the rule reported them
    pub ids: Vec<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: RuleCode,
        entity: EntityKind,
        ids: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            entity,
            ids: ids.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}: {}: {}",
            self.severity,
            self.entity,
            self.code,
            self.ids.join(", "),
            self.message
        )
    }
}

/// Order identifiers by their alphabetic prefix, then numerically (`I2` before `I10`)
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    fn split(id: &str) -> (&str, Option<u64>, &str) {
        let digits_at = id.find(|c: char| c.is_ascii_digit()).unwrap_or(id.len());
        let (prefix, rest) = id.split_at(digits_at);
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, suffix) = rest.split_at(digits_end);
        (prefix, digits.parse().ok(), suffix)
    }
    split(a).cmp(&split(b)).then_with(|| a.cmp(b))
}

/// Deduplicate identifiers and put them in natural order
#[must_use]
pub fn sorted_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter()
        .map(Into::into)
        .sorted_by(|a, b| natural_cmp(a, b))
        .dedup()
        .collect()
}

fn diagnostic_order(a: &Diagnostic, b: &Diagnostic) -> Ordering {
    a.code
        .cmp(&b.code)
        .then_with(|| a.entity.cmp(&b.entity))
        .then_with(|| {
            a.ids
                .iter()
                .zip(&b.ids)
                .map(|(x, y)| natural_cmp(x, y))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.ids.len().cmp(&b.ids.len()))
        })
        .then_with(|| a.severity.cmp(&b.severity))
        .then_with(|| a.message.cmp(&b.message))
}

/// Sort diagnostics deterministically and drop exact repeats
#[must_use]
pub fn aggregate(diagnostics: impl IntoIterator<Item = Diagnostic>) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .sorted_by(diagnostic_order)
        .dedup()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_code_display() {
        assert_eq!(RuleCode::Us04.to_string(), "US04");
        assert_eq!(RuleCode::Us42.to_string(), "US42");
        assert!(RuleCode::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_natural_order() {
        assert_eq!(
            sorted_ids(["I10", "I2", "F1", "I2", "I1"]),
            vec!["F1", "I1", "I2", "I10"]
        );
    }

    #[test]
    fn test_display_format() {
        let diagnostic = Diagnostic::new(
            Severity::Error,
            RuleCode::Us04,
            EntityKind::Family,
            ["F1"],
            "Divorced 0260-06-01 before married 0260-06-06",
        );
        assert_eq!(
            diagnostic.to_string(),
            "ERROR: FAMILY: US04: F1: Divorced 0260-06-01 before married 0260-06-06"
        );
    }

    #[test]
    fn test_aggregate_sorts_and_dedups() {
        let make = |code, id: &str| {
            Diagnostic::new(Severity::Error, code, EntityKind::Individual, [id], "msg")
        };
        let aggregated = aggregate(vec![
            make(RuleCode::Us03, "I10"),
            make(RuleCode::Us01, "I3"),
            make(RuleCode::Us03, "I2"),
            make(RuleCode::Us01, "I3"),
        ]);
        let keys: Vec<_> = aggregated
            .iter()
            .map(|d| format!("{} {}", d.code, d.ids[0]))
            .collect();
        assert_eq!(keys, vec!["US01 I3", "US03 I2", "US03 I10"]);
    }
}
