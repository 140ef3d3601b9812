//! Rules over anomalies recorded while loading
//!
//! These report what the record assembler set aside: redeclared identifiers
//! and unparsable dates.

use super::error;
use crate::algorithm::engine::RuleContext;
use crate::diagnostics::{Diagnostic, RuleCode};

/// US22: every identifier is declared once
#[must_use]
pub fn unique_ids(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .duplicate_ids()
        .iter()
        .map(|duplicate| {
            error(
                RuleCode::Us22,
                duplicate.kind,
                [duplicate.id.as_str()],
                format!(
                    "Identifier declared again on line {}; later record ignored",
                    duplicate.line_number
                ),
            )
        })
        .collect()
}

/// US42: every date is a real calendar date
#[must_use]
pub fn reject_illegitimate_dates(context: &RuleContext<'_>) -> Vec<Diagnostic> {
    context
        .genealogy
        .illegitimate_dates()
        .iter()
        .map(|date| {
            error(
                RuleCode::Us42,
                date.kind,
                [date.owner.as_str()],
                format!(
                    "Illegitimate {} date '{}' on line {}",
                    date.date_kind.to_string().to_lowercase(),
                    date.raw,
                    date.line_number
                ),
            )
        })
        .collect()
}
