//! Family model collection
//!
//! This module provides a specialized collection implementation for Family models.

use crate::collections::GenericCollection;
use crate::models::family::Family;

/// Specialized collection for Family models
#[derive(Debug, Clone, Default)]
pub struct FamilyCollection {
    /// Base generic collection implementation
    inner: GenericCollection<Family>,
}

impl FamilyCollection {
    /// Create a new empty family collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: GenericCollection::new(),
        }
    }

    /// Create a collection from a vector of families
    #[must_use]
    pub fn from_families(families: Vec<Family>) -> Self {
        Self {
            inner: GenericCollection::from_models(families),
        }
    }

    /// Add a family; `false` if the identifier is already taken
    pub fn add(&mut self, family: Family) -> bool {
        self.inner.add(family)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Family> {
        self.inner.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Family> {
        self.inner.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    /// Families in file order
    pub fn iter(&self) -> std::slice::Iter<'_, Family> {
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

    /// Families in which `id` is recorded as husband or wife
    #[must_use]
    pub fn with_spouse(&self, id: &str) -> Vec<&Family> {
        self.inner
            .filter(|family| family.spouses().any(|spouse| spouse == id))
    }

    /// Families with at least `min_children` children
    #[must_use]
    pub fn with_min_children(&self, min_children: usize) -> Vec<&Family> {
        self.inner
            .filter(|family| family.family_size() >= min_children)
    }
}

impl<'a> IntoIterator for &'a FamilyCollection {
    type Item = &'a Family;
    type IntoIter = std::slice::Iter<'a, Family>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_collection() {
        let mut first = Family::new("F1");
        first.husband = Some("I1".into());
        first.children.extend(["I3".to_string(), "I4".to_string()]);
        let mut second = Family::new("F2");
        second.wife = Some("I1".into());

        let mut collection = FamilyCollection::from_families(vec![first, second]);
        assert!(!collection.add(Family::new("F1")));
        assert_eq!(collection.count(), 2);
        assert_eq!(collection.with_spouse("I1").len(), 2);
        assert_eq!(collection.with_min_children(2).len(), 1);
    }
}
