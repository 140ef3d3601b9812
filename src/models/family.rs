//! Family unit representation
//!
//! This module contains the Family model, one per `FAM` record. Spouse and
//! child references are individual identifiers.

use crate::models::date::GedDate;
use crate::models::traits::EntityModel;
use serde::Serialize;
use std::collections::BTreeSet;

/// Representation of a family record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    /// Identifier with the `@` delimiters stripped
    pub id: String,
    /// Marriage date
    pub marriage: GedDate,
    /// Divorce date
    pub divorce: GedDate,
    /// Husband's individual identifier
    pub husband: Option<String>,
    /// Wife's individual identifier
    pub wife: Option<String>,
    /// Children's individual identifiers
    pub children: BTreeSet<String>,
}

impl Family {
    /// Create a new family with default fields
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            marriage: GedDate::Missing,
            divorce: GedDate::Missing,
            husband: None,
            wife: None,
            children: BTreeSet::new(),
        }
    }

    /// Get number of children in the family
    #[must_use]
    pub fn family_size(&self) -> usize {
        self.children.len()
    }

    /// Husband and wife identifiers that were recorded
    pub fn spouses(&self) -> impl Iterator<Item = &str> {
        self.husband
            .as_deref()
            .into_iter()
            .chain(self.wife.as_deref())
    }

    /// The other spouse of `id`, if `id` is one of the two spouses
    #[must_use]
    pub fn other_spouse(&self, id: &str) -> Option<&str> {
        if self.husband.as_deref() == Some(id) {
            self.wife.as_deref()
        } else if self.wife.as_deref() == Some(id) {
            self.husband.as_deref()
        } else {
            None
        }
    }

    /// Whether a divorce was recorded (valid or not)
    #[must_use]
    pub const fn is_divorced(&self) -> bool {
        self.divorce.is_present()
    }
}

impl EntityModel for Family {
    fn id(&self) -> &str {
        &self.id
    }
}
