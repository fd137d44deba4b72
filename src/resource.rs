//! The trait shared by resources that are identified by a generated ID.

use crate::validation::{ResourceKind, ValidationError};

/// A resource with a server-assigned ID that can be validated without
/// touching the database.
pub trait Resource: Clone {
    /// The kind of resource, used in error messages and codes.
    const KIND: ResourceKind;

    /// The kind of resource that this one refers to, if any.
    const DEPENDENCY: Option<ResourceKind>;

    /// The resource's ID.
    fn id(&self) -> &str;

    /// Replace the resource's ID.
    fn with_id(self, id: String) -> Self;

    /// The value reported when a unique constraint fails, e.g. the name of an
    /// account.
    fn unique_key(&self) -> &str;

    /// Check the resource and return every problem found.
    fn validate(&self) -> Vec<ValidationError>;
}
