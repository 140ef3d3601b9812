//! Trait definitions for domain models

/// A trait that all domain models must implement.
///
/// Gives the collections a uniform way to key entities by identifier.
pub trait EntityModel: Clone + Send + Sync + std::fmt::Debug {
    /// Get the unique identifier for this model
    fn id(&self) -> &str;

    /// Create a unique key string representation of the identifier
    fn key(&self) -> String {
        self.id().to_string()
    }
}
