//! The storage port: the contract between controllers and the relational store.
//!
//! Store implementations run every operation in a single database transaction
//! and report constraint violations as a [StorageError]. The translation from
//! the engine's native errors is done by an [ExceptionTranslator], so the
//! engine-specific error codes live in exactly one place.

use crate::{
    Error,
    validation::{ResourceKind, ValidationError},
};

/// The storage-level failures that a store operation can report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    /// A unique constraint failed, e.g. a duplicate ID or name.
    ///
    /// The string is the engine's description of the constraint.
    #[error("a unique constraint failed: {0}")]
    DuplicateKey(String),

    /// A foreign key referred to a row that does not exist.
    #[error("a foreign key refers to a row that does not exist")]
    ParentMissing,

    /// A row could not be deleted because another row still refers to it.
    #[error("the row is still referenced by another row")]
    ChildExists,

    /// The query matched zero rows.
    #[error("the row could not be found")]
    NotFound,

    /// Any other error from the storage engine.
    ///
    /// These errors are not caused by the client and should only be logged.
    #[error("an unexpected storage error occurred: {0}")]
    Unknown(String),
}

/// The kind of statement that produced a native error.
///
/// Some engines use the same error code for different constraint violations
/// depending on whether rows were being written or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A query that only reads rows.
    Read,
    /// An insert or update.
    Write,
    /// A delete.
    Delete,
}

/// Converts native storage engine errors of type `E` into [StorageError]s.
pub trait ExceptionTranslator<E> {
    /// Translate `error`, raised while running a statement of kind `operation`.
    fn translate(&self, operation: Operation, error: E) -> StorageError;
}

/// Extended result code for `SQLITE_CONSTRAINT_FOREIGNKEY`.
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
/// Extended result code for `SQLITE_CONSTRAINT_PRIMARYKEY`.
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
/// Extended result code for `SQLITE_CONSTRAINT_UNIQUE`.
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Translates errors from SQLite via `rusqlite`.
///
/// SQLite reports a failed foreign key with the same code whether the parent
/// is missing or a child still exists, so the [Operation] decides which one
/// it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct SQLiteErrorTranslator;

impl ExceptionTranslator<rusqlite::Error> for SQLiteErrorTranslator {
    fn translate(&self, operation: Operation, error: rusqlite::Error) -> StorageError {
        match error {
            rusqlite::Error::SqliteFailure(sql_error, description)
                if sql_error.extended_code == SQLITE_CONSTRAINT_UNIQUE
                    || sql_error.extended_code == SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StorageError::DuplicateKey(description.unwrap_or_else(|| sql_error.to_string()))
            }
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                match operation {
                    Operation::Delete => StorageError::ChildExists,
                    Operation::Read | Operation::Write => StorageError::ParentMissing,
                }
            }
            rusqlite::Error::QueryReturnedNoRows => StorageError::NotFound,
            error => StorageError::Unknown(error.to_string()),
        }
    }
}

/// CRUD access to a resource of type `R`, keyed by a string ID.
pub trait Store<R> {
    /// Add `resource` to the store and return it.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::DuplicateKey] if the ID or a unique field is
    /// already taken, or [StorageError::ParentMissing] if a referenced
    /// resource does not exist.
    fn create(&self, resource: R) -> Result<R, StorageError>;

    /// Get the resource with `id`.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no such resource.
    fn get(&self, id: &str) -> Result<R, StorageError>;

    /// Get every resource in the order they were created.
    fn get_all(&self) -> Result<Vec<R>, StorageError>;

    /// Replace the stored resource that has the same ID as `resource`.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no such resource, plus the
    /// same errors as [Store::create].
    fn update(&self, resource: R) -> Result<R, StorageError>;

    /// Delete the resource with `id`.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no such resource, or
    /// [StorageError::ChildExists] if other resources still refer to it.
    fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Whether a resource with `id` exists.
    fn exists(&self, id: &str) -> Result<bool, StorageError>;
}

/// The context a controller needs to turn a [StorageError] into a
/// [ValidationError].
///
/// Errors that only make sense for some operations (e.g. `ChildExists` for a
/// create) are translated all the same, since a store cannot produce them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Translation<'a> {
    /// The kind of resource being operated on.
    pub resource: ResourceKind,
    /// The ID (or name) of the resource.
    pub id: &'a str,
    /// The value of the unique field reported when a duplicate key is found.
    pub unique_key: &'a str,
    /// The kind of resource a missing parent would be.
    pub dependency: ResourceKind,
    /// The ID of the parent, if known.
    pub dependency_id: Option<&'a str>,
}

impl Translation<'_> {
    /// Translate `error` into the crate's [Error] type.
    ///
    /// [StorageError::Unknown] is not part of the taxonomy and becomes an
    /// [Error::Storage], which is logged when it is turned into a response.
    pub(crate) fn apply(self, error: StorageError) -> Error {
        let translated = match error {
            StorageError::DuplicateKey(_) => ValidationError::NameExists {
                resource: self.resource,
                name: self.unique_key.to_owned(),
            },
            StorageError::ParentMissing => ValidationError::MissingDependency {
                resource: self.dependency,
                id: self.dependency_id.map(str::to_owned),
            },
            StorageError::ChildExists => ValidationError::References {
                resource: self.resource,
                id: self.id.to_owned(),
            },
            StorageError::NotFound => ValidationError::NotFound {
                resource: self.resource,
                id: self.id.to_owned(),
            },
            StorageError::Unknown(message) => {
                tracing::debug!(
                    "unexpected storage error for {} '{}': {message}",
                    self.resource,
                    self.id
                );
                return Error::Storage(message);
            }
        };

        tracing::debug!("storage error for {} '{}': {translated}", self.resource, self.id);

        Error::Validation(translated.into())
    }
}
