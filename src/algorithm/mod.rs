//! Rule evaluation over a loaded genealogy
//!
//! This module contains the rule catalogue and the engine that runs it:
//! temporal-ordering checks, structural and kinship checks, checks over the
//! anomalies recorded while loading, and the listing rules.

pub mod engine;
pub mod rules;

// Re-export commonly used items
pub use engine::{RuleContext, RuleEngine, RuleOutcome, RuleReport, evaluate_rule};
pub use rules::listing::Survivors;
