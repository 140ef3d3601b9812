//! Model collections and the genealogy graph
//!
//! This module provides an insertion-ordered collection keyed by identifier,
//! the specialized individual and family collections built on it, and the
//! [`Genealogy`] that owns both.

pub mod family;
pub mod genealogy;
pub mod individual;

pub use family::FamilyCollection;
pub use genealogy::Genealogy;
pub use individual::IndividualCollection;

use crate::models::EntityModel;
use rustc_hash::FxHashMap;

/// Generic model collection implementation
///
/// Models are stored in the order they were added and indexed by their ID.
/// An ID can only be added once; the first model wins.
#[derive(Debug, Clone)]
pub struct GenericCollection<T: EntityModel> {
    items: Vec<T>,
    index: FxHashMap<String, usize>,
}

impl<T: EntityModel> GenericCollection<T> {
    /// Create a new empty collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create a collection from a vector of models, dropping repeated IDs
    #[must_use]
    pub fn from_models(models: Vec<T>) -> Self {
        let mut collection = Self::new();
        for model in models {
            collection.add(model);
        }
        collection
    }

    /// Add a model. Returns `false` and leaves the collection untouched if the ID is taken.
    pub fn add(&mut self, model: T) -> bool {
        if self.index.contains_key(model.id()) {
            return false;
        }
        self.index.insert(model.key(), self.items.len());
        self.items.push(model);
        true
    }

    /// Get a model by its identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    /// Get a mutable model by its identifier
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&idx| &mut self.items[idx])
    }

    /// Check if the collection contains a model with the given ID
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Models in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Count the total number of models in the collection
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filter models by a predicate function
    pub fn filter<F>(&self, predicate: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().filter(|model| predicate(model)).collect()
    }
}

impl<T: EntityModel> Default for GenericCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: EntityModel> IntoIterator for &'a GenericCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Individual;

    #[test]
    fn test_first_model_wins() {
        let mut collection = GenericCollection::new();
        let mut first = Individual::new("I1");
        first.name = Some("First /One/".into());
        let mut second = Individual::new("I1");
        second.name = Some("Second /One/".into());

        assert!(collection.add(first));
        assert!(!collection.add(second));
        assert_eq!(collection.count(), 1);
        assert_eq!(collection.get("I1").unwrap().display_name(), "First /One/");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let collection = GenericCollection::from_models(vec![
            Individual::new("I10"),
            Individual::new("I2"),
            Individual::new("I1"),
        ]);
        let ids: Vec<_> = collection.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["I10", "I2", "I1"]);
    }
}
