//! Domain models for the genealogy graph
//!
//! This module contains the entity models built from a GEDCOM file and the
//! small value types they are made of.

pub mod date;
pub mod family;
pub mod individual;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use date::GedDate;
pub use family::Family;
pub use individual::Individual;
pub use traits::EntityModel;
pub use types::{DateKind, EntityKind, Sex, Tag};
