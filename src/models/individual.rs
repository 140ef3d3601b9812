//! Individual entity model
//!
//! This module contains the Individual entity, one per `INDI` record. Cross
//! references to families are identifiers, resolved through the owning
//! [`Genealogy`](crate::collections::Genealogy).

use crate::models::date::GedDate;
use crate::models::traits::EntityModel;
use crate::models::types::Sex;
use crate::utils::date::years_between;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Core Individual entity representing a person in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Individual {
    /// Identifier with the `@` delimiters stripped
    pub id: String,
    /// Raw display name, `Given /Surname/`
    pub name: Option<String>,
    /// Sex code
    pub sex: Sex,
    /// Birth date
    pub birth: GedDate,
    /// Death date; absent means presumed alive
    pub death: GedDate,
    /// Derived age in whole years, relative to death or to the evaluation date
    pub age: Option<i32>,
    /// Derived alive flag
    pub alive: bool,
    /// Family in which this individual is a child
    pub child_of: Option<String>,
    /// Families in which this individual is a spouse
    pub spouse_of: BTreeSet<String>,
}

impl Individual {
    /// Create a new Individual with default fields
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            sex: Sex::Unknown,
            birth: GedDate::Missing,
            death: GedDate::Missing,
            age: None,
            alive: true,
            child_of: None,
            spouse_of: BTreeSet::new(),
        }
    }

    /// Display name, or `NA` when no `NAME` line was seen
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("NA")
    }

    /// Given name: the text before the first `/`, trimmed
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        let given = name.split('/').next().unwrap_or_default().trim();
        (!given.is_empty()).then_some(given)
    }

    /// Surname: the text between the `/` delimiters
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        let surname = name.split('/').nth(1)?.trim();
        (!surname.is_empty()).then_some(surname)
    }

    /// Whether a death was recorded (valid or not)
    #[must_use]
    pub const fn is_deceased(&self) -> bool {
        self.death.is_present()
    }

    /// Age at `reference`, using the death date instead when it comes first.
    ///
    /// `None` when the birth date is absent or invalid, or the individual died
    /// with an invalid death date.
    #[must_use]
    pub fn age_at(&self, reference: NaiveDate) -> Option<i32> {
        let birth = self.birth.valid()?;
        let end = match &self.death {
            GedDate::Valid(death) if *death < reference => *death,
            GedDate::Valid(_) | GedDate::Missing => reference,
            GedDate::Invalid(_) => return None,
        };
        Some(years_between(birth, end))
    }

    /// Compute the derived alive flag and age against `today`.
    ///
    /// Age is measured to the death date when one was recorded, otherwise to
    /// `today`. An invalid birth date forces the individual to not-alive.
    pub fn compute_derived(&mut self, today: NaiveDate) {
        self.alive = !self.death.is_present() && !self.birth.is_invalid();

        let reference = match &self.death {
            GedDate::Valid(death) => Some(*death),
            GedDate::Invalid(_) => None,
            GedDate::Missing => Some(today),
        };
        self.age = match (self.birth.valid(), reference) {
            (Some(birth), Some(reference)) => Some(years_between(birth, reference)),
            _ => None,
        };
    }
}

impl EntityModel for Individual {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_on_birthday() {
        let mut individual = Individual::new("I1");
        individual.birth = ymd(2017, 2, 25).into();

        individual.compute_derived(ymd(2020, 2, 24));
        assert!(individual.alive);
        assert_eq!(individual.age, Some(2));

        individual.compute_derived(ymd(2020, 2, 25));
        assert_eq!(individual.age, Some(3));
    }

    #[test]
    fn test_age_at_death() {
        let mut individual = Individual::new("I1");
        individual.birth = ymd(1960, 4, 1).into();
        individual.death = ymd(2004, 2, 2).into();

        individual.compute_derived(ymd(2021, 10, 1));
        assert!(!individual.alive);
        assert_eq!(individual.age, Some(43));
    }

    #[test]
    fn test_invalid_dates_give_no_age() {
        let mut individual = Individual::new("I1");
        individual.birth = GedDate::Invalid("35 NOV 0290".into());
        individual.compute_derived(ymd(2021, 10, 1));
        assert!(!individual.alive);
        assert_eq!(individual.age, None);

        let mut individual = Individual::new("I2");
        individual.birth = ymd(1900, 1, 1).into();
        individual.death = GedDate::Invalid("31 FEB 1950".into());
        individual.compute_derived(ymd(2021, 10, 1));
        assert!(!individual.alive);
        assert_eq!(individual.age, None);
    }

    #[test]
    fn test_name_parts() {
        let mut individual = Individual::new("I1");
        individual.name = Some("Aerys /Targaryen/".into());
        assert_eq!(individual.given_name(), Some("Aerys"));
        assert_eq!(individual.surname(), Some("Targaryen"));

        individual.name = Some("Nymeria".into());
        assert_eq!(individual.surname(), None);
        assert_eq!(Individual::new("I2").display_name(), "NA");
    }
}
