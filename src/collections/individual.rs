//! Individual model collection
//!
//! This module provides a specialized collection implementation for Individual models.

use crate::collections::GenericCollection;
use crate::models::individual::Individual;
use chrono::NaiveDate;

/// Specialized collection for Individual models
#[derive(Debug, Clone, Default)]
pub struct IndividualCollection {
    /// Base generic collection implementation
    inner: GenericCollection<Individual>,
}

impl IndividualCollection {
    /// Create a new empty individual collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: GenericCollection::new(),
        }
    }

    /// Create a collection from a vector of individuals
    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self {
            inner: GenericCollection::from_models(individuals),
        }
    }

    /// Add an individual; `false` if the identifier is already taken
    pub fn add(&mut self, individual: Individual) -> bool {
        self.inner.add(individual)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Individual> {
        self.inner.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Individual> {
        self.inner.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    /// Individuals in file order
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.inner.iter()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Individuals whose derived alive flag is set
    #[must_use]
    pub fn alive(&self) -> Vec<&Individual> {
        self.inner.filter(|individual| individual.alive)
    }

    /// Individuals with a recorded death
    #[must_use]
    pub fn deceased(&self) -> Vec<&Individual> {
        self.inner.filter(Individual::is_deceased)
    }

    /// Recompute alive flags and ages against `today`
    pub fn compute_derived(&mut self, today: NaiveDate) {
        for individual in self.inner.iter_mut() {
            individual.compute_derived(today);
        }
    }
}

impl<'a> IntoIterator for &'a IndividualCollection {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
