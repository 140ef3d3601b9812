//! A Rust library for reading GEDCOM genealogy files into an in-memory graph
//! of individuals and families, and auditing that graph against a catalogue
//! of consistency and listing rules.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod models;
pub mod reader;
pub mod summary;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::ReaderConfig;
pub use error::{GedcomError, Result};
pub use reader::GedcomReader;

// Graph and models
pub use collections::Genealogy;
pub use models::{DateKind, EntityKind, Family, GedDate, Individual, Sex};

// Rule evaluation
pub use algorithm::{RuleContext, RuleEngine, RuleOutcome, RuleReport};
pub use diagnostics::{Diagnostic, DiagnosticSink, RuleCode, Severity, WriterSink};

// Loading
pub use loader::{load_from_reader, load_from_str, load_gedcom};
pub use summary::SummaryTables;
